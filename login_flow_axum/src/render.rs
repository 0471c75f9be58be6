use login_flow::{FieldType, LoginFlow, TextKind};

/// Server-side rendering of a flow's password form, used when a failed
/// browser submission is answered in place and by login UI pages that
/// do not bring their own frontend. Real deployments usually point
/// `login_ui_url` at their own UI and render from the flow JSON instead.
pub fn login_form(flow: &LoginFlow) -> String {
    let ui = flow.ui();
    let mut html = String::with_capacity(1024);

    html.push_str("<!DOCTYPE html><html><head><title>Sign in</title></head><body>\n");
    html.push_str("<h1>Sign in</h1>\n");

    for message in flow.messages.iter().chain(ui.messages.iter()) {
        let kind = match message.kind {
            TextKind::Error => "error",
            TextKind::Info => "info",
        };
        html.push_str(&format!(
            "<p class=\"message {kind}\">{}</p>\n",
            escape_html(&message.text)
        ));
    }

    html.push_str(&format!(
        "<form action=\"{}\" method=\"{}\">\n",
        escape_html(&ui.action),
        escape_html(&ui.method)
    ));

    for field in &ui.fields {
        let input_type = match field.field_type {
            FieldType::Text => "text",
            FieldType::Password => "password",
            FieldType::Hidden => "hidden",
        };
        if field.field_type != FieldType::Hidden {
            html.push_str(&format!(
                "<label for=\"{0}\">{0}</label>\n",
                escape_html(&field.name)
            ));
        }
        html.push_str(&format!(
            "<input type=\"{}\" name=\"{}\" value=\"{}\"{}>\n",
            input_type,
            escape_html(&field.name),
            escape_html(field.value.as_deref().unwrap_or_default()),
            if field.required { " required" } else { "" }
        ));
        for message in &field.messages {
            html.push_str(&format!(
                "<p class=\"field-message\">{}</p>\n",
                escape_html(&message.text)
            ));
        }
    }

    html.push_str("<button type=\"submit\">Sign in</button>\n</form>\n</body></html>\n");
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
