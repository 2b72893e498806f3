//! Server-rendered HTML pages.
//!
//! Every string that came from a request or from the database goes through
//! [`escape`] before it is written into markup.

use axum::http::StatusCode;
use std::fmt::Write;

use crate::db::models::Person;
use crate::middleware::flash::FlashMessage;

/// Entry form; `POST /` with `name` and `hobby`.
pub fn form_page(messages: &[FlashMessage]) -> String {
    let body = format!(
        r#"{alerts}<h1>Add a person</h1>
<form method="post" action="/">
  <label for="name">Name</label>
  <input type="text" id="name" name="name">
  <label for="hobby">Hobby</label>
  <input type="text" id="hobby" name="hobby">
  <button type="submit">Save</button>
</form>
<p><a href="/show">See everyone</a></p>
"#,
        alerts = render_alerts(messages),
    );
    layout("Add a person", &body)
}

/// Table of every stored person.
pub fn list_page(people: &[Person], messages: &[FlashMessage]) -> String {
    let mut body = render_alerts(messages);
    body.push_str("<h1>People</h1>\n");

    if people.is_empty() {
        body.push_str("<p>Nobody has been added yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Id</th><th>Name</th><th>Hobby</th></tr></thead>\n<tbody>\n",
        );
        for person in people {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                person.id,
                escape(&person.name),
                escape(&person.hobby),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str(r#"<p><a href="/">Add another person</a></p>"#);
    body.push('\n');
    layout("People", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the form</a></p>\n",
        escape(title),
        escape_multiline(message),
    );
    layout(title, &body)
}

fn render_alerts(messages: &[FlashMessage]) -> String {
    messages.iter().fold(String::new(), |mut out, message| {
        let _ = writeln!(
            out,
            r#"<div class="alert alert-{}">{}</div>"#,
            message.kind.as_str(),
            escape_multiline(&message.text),
        );
        out
    })
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape, then turn line breaks into `<br>`.
fn escape_multiline(input: &str) -> String {
    escape(input).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::flash::FlashKind;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#x27;y&#x27;"
        );
    }

    #[test]
    fn form_renders_danger_alerts_with_line_breaks() {
        let html = form_page(&[FlashMessage {
            kind: FlashKind::Danger,
            text: "You must enter a name.\nYou must enter a hobby.".to_string(),
        }]);
        assert!(html.contains(
            r#"<div class="alert alert-danger">You must enter a name.<br>You must enter a hobby.</div>"#
        ));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"name="hobby""#));
    }

    #[test]
    fn list_escapes_people() {
        let html = list_page(
            &[Person {
                id: 7,
                name: "<b>Ada</b>".to_string(),
                hobby: "Climbing".to_string(),
            }],
            &[],
        );
        assert!(html.contains("<td>7</td><td>&lt;b&gt;Ada&lt;/b&gt;</td><td>Climbing</td>"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert!(list_page(&[], &[]).contains("Nobody has been added yet."));
    }
}
