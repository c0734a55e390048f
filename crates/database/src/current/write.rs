mod profile;

pub use profile::CurrentWriteProfile;
