use axum::response::Html;

use campusdesk_models::Identity;

use crate::middleware::session::CurrentSession;

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render(title: &str, identity: &Identity) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
<head><title>{title} | Campusdesk</title></head>
<body>
  <h1>{title}</h1>
  <p>Signed in as {name} ({email}), {role}</p>
  <form method="post" action="/logout"><button type="submit">Sign out</button></form>
</body>
</html>"#,
        title = title,
        name = escape_html(&identity.name),
        email = escape_html(&identity.email),
        role = identity.role,
    ))
}

// Any signed-in user may open any dashboard; the gate checks presence only.

pub async fn admin_dashboard(CurrentSession(session): CurrentSession) -> Html<String> {
    render("Admin dashboard", &session.identity)
}

pub async fn faculty_dashboard(CurrentSession(session): CurrentSession) -> Html<String> {
    render("Faculty dashboard", &session.identity)
}

pub async fn student_dashboard(CurrentSession(session): CurrentSession) -> Html<String> {
    render("Student dashboard", &session.identity)
}
