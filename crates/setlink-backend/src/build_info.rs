pub const BUILD_INFO_CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
