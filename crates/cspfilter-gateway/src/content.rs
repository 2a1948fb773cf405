//! Minimal content rendering.
//!
//! Stands in for the platform's page rendering: it shows how downstream
//! handlers consume the [`ScriptNonce`] set by the filter.

use axum::response::Html;

use crate::filter::ScriptNonce;
use crate::path_info::RequestPathInfo;

pub fn render_page(info: &RequestPathInfo, nonce: &ScriptNonce) -> Html<String> {
    let resource = escape(&info.resource_path);
    let nonce = escape(nonce.value());
    Html(format!(
        "<!doctype html>\n\
         <html><head><title>{resource}</title></head>\n\
         <body data-resource=\"{resource}\">\n\
         <script nonce=\"{nonce}\">document.body.dataset.ready = \"1\";</script>\n\
         </body></html>\n"
    ))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
