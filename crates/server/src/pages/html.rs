//! HTML page building for the public pages. All user supplied
//! text goes through [escape_html].

use model::{
    DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS, HANDLE_MAX_CHARS, HANDLE_MIN_CHARS, Profile,
};

const STYLE: &str = "\
body { margin: 0; font-family: system-ui, sans-serif; background: #f4f4f5; color: #18181b; }\
.card { max-width: 42rem; margin: 2rem auto; padding: 1.5rem; background: #fff; border-radius: 0.75rem; box-shadow: 0 1px 4px rgba(0,0,0,0.1); }\
.card h1 { text-align: center; }\
label { display: block; margin-top: 1rem; font-weight: 600; }\
input, textarea { width: 100%; box-sizing: border-box; margin-top: 0.25rem; padding: 0.5rem; border: 1px solid #d4d4d8; border-radius: 0.375rem; }\
textarea { resize: none; min-height: 6rem; }\
button { margin-top: 1rem; padding: 0.5rem 1rem; border: none; border-radius: 0.375rem; background: #18181b; color: #fff; cursor: pointer; }\
button:disabled { opacity: 0.5; cursor: default; }\
.links-header { display: flex; justify-content: space-between; align-items: center; margin-top: 1.5rem; }\
.links-header h2 { margin: 0; }\
.link-row-edit { margin-top: 1rem; padding: 0.75rem; border: 1px solid #e4e4e7; border-radius: 0.375rem; }\
.field-error { display: block; color: #dc2626; font-size: 0.875rem; min-height: 1rem; }\
.submit-button { width: 100%; }\
.profile { text-align: center; }\
.avatar { width: 6rem; height: 6rem; border-radius: 50%; object-fit: cover; }\
.description { color: #52525b; }\
.links { display: flex; flex-direction: column; gap: 0.75rem; margin-top: 1.5rem; }\
.link-row { display: block; padding: 0.75rem; border: 1px solid #e4e4e7; border-radius: 0.375rem; color: inherit; text-decoration: none; }\
.link-row:hover { background: #f4f4f5; }\
";

const FORM_BODY: &str = r#"<main class="card">
<h1>Create Your Setlink</h1>
<form id="create-form" novalidate>
<label for="handle">Username/Handle</label>
<input id="handle" placeholder="your-handle">
<span class="field-error" id="handle-error"></span>
<label for="imageUrl">Profile Image URL</label>
<input id="imageUrl" placeholder="https://your-image-url.com">
<span class="field-error" id="imageUrl-error"></span>
<label for="description">Bio/Description</label>
<textarea id="description" placeholder="Tell us about yourself"></textarea>
<span class="field-error" id="description-error"></span>
<section>
<div class="links-header">
<h2>Your Links</h2>
<button type="button" id="add-link">Add Link</button>
</div>
<div id="links"></div>
</section>
<button type="submit" class="submit-button" id="submit">Create Setlink</button>
</form>
</main>"#;

const FORM_SCRIPT: &str = r#"
const PUBLIC_BASE_URL = __PUBLIC_BASE_URL__;
const HANDLE_MIN = __HANDLE_MIN__;
const HANDLE_MAX = __HANDLE_MAX__;
const DESCRIPTION_MIN = __DESCRIPTION_MIN__;
const DESCRIPTION_MAX = __DESCRIPTION_MAX__;

const form = document.getElementById("create-form");
const linkList = document.getElementById("links");
const addLinkButton = document.getElementById("add-link");
const submitButton = document.getElementById("submit");
let submitting = false;

function linkRow() {
    const row = document.createElement("div");
    row.className = "link-row-edit";
    row.innerHTML =
        '<input class="link-title" placeholder="Link Title">' +
        '<span class="field-error link-title-error"></span>' +
        '<input class="link-url" placeholder="URL">' +
        '<span class="field-error link-url-error"></span>' +
        '<button type="button" class="remove-link">Remove</button>';
    row.querySelector(".remove-link").addEventListener("click", () => {
        if (!submitting && linkList.children.length > 1) {
            row.remove();
            updateRemoveButtons();
        }
    });
    return row;
}

function updateRemoveButtons() {
    const single = linkList.children.length <= 1;
    for (const button of linkList.querySelectorAll(".remove-link")) {
        button.style.display = single ? "none" : "";
    }
}

function addLink() {
    linkList.appendChild(linkRow());
    updateRemoveButtons();
}

addLinkButton.addEventListener("click", () => {
    if (!submitting) {
        addLink();
    }
});
addLink();

function isValidUrl(value) {
    try {
        new URL(value);
        return true;
    } catch {
        return false;
    }
}

function setError(id, message) {
    document.getElementById(id).textContent = message;
}

function collectAndValidate() {
    let valid = true;
    const handle = document.getElementById("handle").value;
    const imageUrl = document.getElementById("imageUrl").value;
    const description = document.getElementById("description").value;

    setError("handle-error", "");
    setError("imageUrl-error", "");
    setError("description-error", "");

    if (handle.length < HANDLE_MIN || handle.length > HANDLE_MAX) {
        setError("handle-error", "Handle must be between " + HANDLE_MIN + " and " + HANDLE_MAX + " characters");
        valid = false;
    }
    if (!isValidUrl(imageUrl)) {
        setError("imageUrl-error", "Profile image URL is not a valid URL");
        valid = false;
    }
    if (description.length < DESCRIPTION_MIN || description.length > DESCRIPTION_MAX) {
        setError("description-error", "Description must be between " + DESCRIPTION_MIN + " and " + DESCRIPTION_MAX + " characters");
        valid = false;
    }

    const links = [];
    for (const row of linkList.children) {
        const title = row.querySelector(".link-title").value;
        const url = row.querySelector(".link-url").value;
        const titleError = row.querySelector(".link-title-error");
        const urlError = row.querySelector(".link-url-error");
        titleError.textContent = "";
        urlError.textContent = "";
        if (title.length < 1) {
            titleError.textContent = "Link title must not be empty";
            valid = false;
        }
        if (!isValidUrl(url)) {
            urlError.textContent = "Link URL is not a valid URL";
            valid = false;
        }
        links.push({ title: title, url: url });
    }

    if (!valid) {
        return null;
    }
    return {
        handle: handle,
        description: description,
        imageUrl: imageUrl,
        links: links,
    };
}

function clearForm() {
    form.reset();
    linkList.textContent = "";
    addLink();
}

function setSubmitting(value) {
    submitting = value;
    for (const field of form.querySelectorAll("input, textarea, button")) {
        field.disabled = value;
    }
    submitButton.textContent = value ? "Creating..." : "Create Setlink";
}

form.addEventListener("submit", async (event) => {
    event.preventDefault();
    if (submitting) {
        return;
    }
    const values = collectAndValidate();
    if (values === null) {
        return;
    }
    setSubmitting(true);
    try {
        const response = await fetch("/api/setlink", {
            method: "POST",
            headers: { "Content-Type": "application/json" },
            body: JSON.stringify(values),
        });
        const data = await response.json();
        if (!response.ok) {
            alert("Error: " + data.message);
            return;
        }
        clearForm();
        window.location.href = PUBLIC_BASE_URL + "/" + data.handle;
    } catch (error) {
        alert("An error occurred while submitting the form");
    } finally {
        setSubmitting(false);
    }
});
"#;

pub(crate) fn create_profile_page(public_base_url: &str) -> String {
    let script = FORM_SCRIPT
        .replace(
            "__PUBLIC_BASE_URL__",
            &js_string_literal(public_base_url.trim_end_matches('/')),
        )
        .replace("__HANDLE_MIN__", &HANDLE_MIN_CHARS.to_string())
        .replace("__HANDLE_MAX__", &HANDLE_MAX_CHARS.to_string())
        .replace("__DESCRIPTION_MIN__", &DESCRIPTION_MIN_CHARS.to_string())
        .replace("__DESCRIPTION_MAX__", &DESCRIPTION_MAX_CHARS.to_string());
    layout(
        "Create Your Setlink",
        &format!("{FORM_BODY}\n<script>{script}</script>"),
    )
}

pub(crate) fn profile_page(profile: &Profile) -> String {
    let mut links = String::new();
    for link in &profile.links {
        links.push_str(&format!(
            "<a class=\"link-row\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>\n",
            escape_html(&link.url),
            escape_html(&link.title),
        ));
    }

    let body = format!(
        "<main class=\"card profile\">\n\
         <img class=\"avatar\" src=\"{image_url}\" alt=\"Profile image\">\n\
         <h1>@{handle}</h1>\n\
         <p class=\"description\">{description}</p>\n\
         <nav class=\"links\">\n{links}</nav>\n\
         </main>",
        image_url = escape_html(&profile.image_url),
        handle = escape_html(&profile.handle),
        description = escape_html(&profile.description),
    );

    layout(&format!("@{}", profile.handle), &body)
}

pub(crate) fn not_found_page(handle: &str) -> String {
    let body = format!(
        "<main class=\"card profile\">\n\
         <h1>Profile not found</h1>\n\
         <p class=\"description\">There is no profile for @{}.</p>\n\
         <p><a href=\"/\">Create your own Setlink</a></p>\n\
         </main>",
        escape_html(handle),
    );
    layout("Profile not found", &body)
}

pub(crate) fn internal_error_page() -> String {
    let body = "<main class=\"card profile\">\n\
                <h1>Something went wrong</h1>\n\
                <p class=\"description\">Please try again later.</p>\n\
                </main>";
    layout("Something went wrong", body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn js_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '<' => literal.push_str("\\u003C"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

#[cfg(test)]
mod tests {
    use model::LinkEntry;

    use super::*;

    fn test_profile() -> Profile {
        Profile {
            handle: "alice".to_string(),
            description: "Hello world!".to_string(),
            image_url: "https://x.com/a.png".to_string(),
            links: vec![
                LinkEntry {
                    title: "Site".to_string(),
                    url: "https://alice.dev".to_string(),
                },
                LinkEntry {
                    title: "Blog".to_string(),
                    url: "https://alice.dev/blog".to_string(),
                },
            ],
        }
    }

    #[test]
    fn escape_html_escapes_special_characters() {
        assert_eq!(
            escape_html(r#"<script>"a" & 'b'</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn profile_page_contains_profile_data_in_order() {
        let page = profile_page(&test_profile());
        assert!(page.contains("@alice"));
        assert!(page.contains("Hello world!"));
        assert!(page.contains("https://x.com/a.png"));

        let site = page.find("Site").unwrap();
        let blog = page.find("Blog").unwrap();
        assert!(site < blog);
    }

    #[test]
    fn profile_page_escapes_user_content() {
        let mut profile = test_profile();
        profile.description = "<script>alert(1)</script>".to_string();
        let page = profile_page(&profile);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn create_profile_page_embeds_base_url_and_limits() {
        let page = create_profile_page("https://setlink.example/");
        assert!(page.contains(r#"const PUBLIC_BASE_URL = "https://setlink.example";"#));
        assert!(page.contains("const HANDLE_MIN = 2;"));
        assert!(page.contains("const HANDLE_MAX = 50;"));
        assert!(page.contains("const DESCRIPTION_MIN = 10;"));
        assert!(page.contains("const DESCRIPTION_MAX = 500;"));
        assert!(page.contains("/api/setlink"));
    }

    #[test]
    fn not_found_page_escapes_handle() {
        let page = not_found_page("<bad>");
        assert!(page.contains("&lt;bad&gt;"));
        assert!(!page.contains("<bad>"));
    }
}
