//! Minimal HTML rendering for the generated admin pages.

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

pub fn page(site_title: &str, heading: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - {site}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.8rem; text-align: left; }}\n\
         form.inline {{ display: inline; }}\n\
         nav {{ margin-bottom: 1rem; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/admin\">{site}</a></nav>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        site = escape(site_title),
        title = escape(heading),
        body = body,
    )
}

pub fn index(site_title: &str, resources: &[&str]) -> String {
    let mut body = String::from("<ul>\n");
    for name in resources {
        body.push_str(&format!(
            "<li><a href=\"/admin/{name}\">{name}</a></li>\n",
            name = escape(name)
        ));
    }
    body.push_str("</ul>\n");
    page(site_title, "Resources", &body)
}
