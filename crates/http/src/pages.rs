//! Server-rendered HTML pages.
//!
//! Every piece of user or database text goes through [`escape_html`]. Topic
//! names are validated identifiers and safe in URLs as-is.

use std::fmt::Write as _;

use axum::http::StatusCode;
use wortschatz_core::{MAX_NEW_TOPIC_COLUMNS, Topic, TopicTable};

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}\
th{background:#f2f2f2}label{display:block;margin-top:.6rem}nav a{margin-right:1rem}\
.error{color:#a00}";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a><a href=\"/topics/new\">New topic</a></nav>\n\
         <h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn topic_nav(topic: &Topic) -> String {
    let name = topic.name.as_str();
    format!(
        "<nav><a href=\"/topics/{name}\">Show</a><a href=\"/topics/{name}/add\">Add</a>\
         <a href=\"/topics/{name}/edit\">Edit</a></nav>"
    )
}

pub fn home(topics: &[Topic]) -> String {
    let mut body = String::new();
    if topics.is_empty() {
        body.push_str("<p>No topics yet. <a href=\"/topics/new\">Create one</a>.</p>");
    } else {
        body.push_str("<ul>\n");
        for topic in topics {
            let _ = writeln!(
                body,
                "<li><a href=\"/topics/{name}\">{label}</a> \
                 (<a href=\"/topics/{name}/add\">add</a>, <a href=\"/topics/{name}/edit\">edit</a>)</li>",
                name = topic.name,
                label = escape_html(&topic.label),
            );
        }
        body.push_str("</ul>");
    }
    layout("Topics", &body)
}

pub fn topic_table(table: &TopicTable) -> String {
    let columns = table.display_columns();
    let mut body = topic_nav(&table.topic);
    body.push_str("\n<table>\n<thead><tr>");
    for column in &columns {
        let _ = write!(body, "<th>{}</th>", escape_html(column));
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for entry in &table.entries {
        body.push_str("<tr>");
        for column in &columns {
            let cell = if column.eq_ignore_ascii_case(wortschatz_core::ID_COLUMN) {
                entry.id.to_string()
            } else {
                entry.get(column).map(escape_html).unwrap_or_default()
            };
            let _ = write!(body, "<td>{cell}</td>");
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>");
    let _ = write!(body, "\n<p>{} entries</p>", table.entries.len());
    layout(&table.topic.label, &body)
}

fn text_field(name: &str, label: &str) -> String {
    let name = escape_html(name);
    format!(
        "<label for=\"{name}\">{label}</label><input type=\"text\" id=\"{name}\" name=\"{name}\">",
        label = escape_html(label),
    )
}

pub fn new_topic_form() -> String {
    let mut body = String::from("<form method=\"post\" action=\"/topics/new\">\n");
    body.push_str(&text_field("table_name", "Table name"));
    body.push_str(&text_field("translation", "Translation"));
    for i in 0..MAX_NEW_TOPIC_COLUMNS {
        let label = if i == 0 { "Column 0 (sorted by)".to_owned() } else { format!("Column {i}") };
        body.push_str(&text_field(&format!("column_{i}"), &label));
    }
    body.push_str("\n<p><button type=\"submit\">Create</button></p>\n</form>");
    layout("New topic", &body)
}

pub fn add_form(topic: &Topic, columns: &[String]) -> String {
    let mut body = topic_nav(topic);
    let _ = write!(body, "\n<form method=\"post\" action=\"/topics/{}/add\">\n", topic.name);
    for column in columns {
        body.push_str(&text_field(column, column));
    }
    body.push_str("\n<p><button type=\"submit\">Add</button></p>\n</form>");
    layout(&format!("Add to {}", topic.label), &body)
}

pub fn edit_form(topic: &Topic, columns: &[String]) -> String {
    let mut body = topic_nav(topic);
    let _ = write!(body, "\n<form method=\"post\" action=\"/topics/{}/edit\">\n", topic.name);
    let source = columns.first().map_or("expression", String::as_str);
    body.push_str(&text_field("expression", &format!("Expression ({source})")));
    body.push_str("<label for=\"column\">Column</label><select id=\"column\" name=\"column\">");
    for column in columns {
        let column = escape_html(column);
        let _ = write!(body, "<option value=\"{column}\">{column}</option>");
    }
    body.push_str("</select>");
    body.push_str(&text_field("value", "Value"));
    body.push_str("\n<p><button type=\"submit\">Edit</button></p>\n</form>");
    layout(&format!("Edit {}", topic.label), &body)
}

/// What a confirmation page offers to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Add,
    Edit,
    NewTopic,
}

/// Confirmation after a successful write, echoing the submitted fields.
pub fn confirmation(topic: &Topic, next: NextAction, fields: &[(String, String)]) -> String {
    let name = topic.name.as_str();
    let mut body = String::from("<table>\n");
    for (field, value) in fields {
        let _ = writeln!(
            body,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(field),
            escape_html(value)
        );
    }
    body.push_str("</table>\n<p>");
    let another = match next {
        NextAction::Add => format!("<a href=\"/topics/{name}/add\">Add another</a>"),
        NextAction::Edit => format!("<a href=\"/topics/{name}/edit\">Edit another</a>"),
        NextAction::NewTopic => "<a href=\"/topics/new\">Create another topic</a>".to_owned(),
    };
    let _ = write!(
        body,
        "{another} &middot; <a href=\"/topics/{name}\">Show {}</a></p>",
        escape_html(&topic.label)
    );
    layout("Saved", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(title, &format!("<p class=\"error\">{}</p>", escape_html(message)))
}
