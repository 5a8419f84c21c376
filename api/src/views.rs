//! Server-rendered pages.

use crate::flash::Notice;
use crate::model::{Category, CustomerType, EventRecord, PrepMethod, PricingRank};

const NAV: [(&str, &str); 3] = [("/", "Home"), ("/add/", "Add Event"), ("/view/", "View Events")];

pub fn escape(raw: &str) -> String {
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

fn layout(title: &str, path: &str, notice: Option<Notice>, body: &str) -> String {
    let nav: String = NAV
        .iter()
        .map(|(href, label)| {
            let class = if *href == path { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect();

    let flash = notice
        .map(|n| format!("<p class=\"flash {}\">{}</p>", n.category(), escape(n.message())))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title} | Food Waste</title>\n</head>\n<body>\n<nav>{nav}</nav>\n{flash}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn index(recorded: i64, notice: Option<Notice>) -> String {
    let body = format!(
        "<h1>Food Waste Estimator</h1>\n\
         <p>Record a catered event and get an estimate of the servings that will go to waste.</p>\n\
         <p>{recorded} event(s) recorded so far.</p>"
    );
    layout("Home", "/", notice, &body)
}

fn options<C: Category>() -> String {
    C::ALL
        .iter()
        .map(|c| format!("<option value=\"{}\">{}</option>", c.rank(), escape(c.label())))
        .collect()
}

pub fn add_form(notice: Option<Notice>) -> String {
    let body = format!(
        "<h1>Add Event</h1>\n\
         <form method=\"post\" action=\"/add/\">\n\
         <label>Number of guests <input name=\"guestno\" type=\"number\" min=\"1\" required></label>\n\
         <label>Number of servings <input name=\"serveno\" type=\"number\" min=\"1\" required></label>\n\
         <label>Pricing <select name=\"price\">{}</select></label>\n\
         <label>Preparation <select name=\"prep\">{}</select></label>\n\
         <label>Customer <select name=\"regular\">{}</select></label>\n\
         <button type=\"submit\">Submit</button>\n\
         </form>",
        options::<PricingRank>(),
        options::<PrepMethod>(),
        options::<CustomerType>(),
    );
    layout("Add Event", "/add/", notice, &body)
}

fn row(r: &EventRecord) -> String {
    let wasted = r
        .servings_wasted
        .map(|w| format!("{w:.2}"))
        .unwrap_or_default();
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        r.epoch,
        escape(&r.date_time),
        r.guest_no,
        r.servings_no,
        escape(&r.pricing_rank),
        escape(&r.prep_method_rank),
        escape(&r.customer_rank),
        wasted,
    )
}

pub fn view(records: &[EventRecord], notice: Option<Notice>) -> String {
    let rows: String = records.iter().map(row).collect();

    let body = format!(
        "<h1>Recorded Events</h1>\n\
         <table>\n\
         <thead><tr><th>Epoch</th><th>Date</th><th>Guests</th><th>Servings</th><th>Pricing</th><th>Preparation</th><th>Customer</th><th>Servings Wasted</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n\
         </table>"
    );
    layout("View Events", "/view/", notice, &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!("<h1>{}</h1>\n<p>{}</p>", escape(title), escape(message));
    layout(title, "", None, &body)
}
