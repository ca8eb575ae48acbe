//! render_json.rs
//! JSON rendition of a page: same containers, same order as the HTML.
//! Container order lives in an array, so canonical (key-sorted) output keeps it.

use serde_json::Value;

use crate::surface::Page;
use crate::ReportError;

pub fn render_json(page: &Page) -> Result<Value, ReportError> {
    serde_json::to_value(page.view()).map_err(|e| ReportError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ContainerId, Node};
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    #[test]
    fn containers_and_nodes_are_tagged() {
        let mut page = Page::full("Risk");
        for id in ContainerId::ALL {
            if id != ContainerId::DomainDonuts {
                page.hide(id);
            }
        }
        if let Some(c) = page.domain_donuts.as_mut() {
            c.push(Node::Donut {
                label: "IAM".into(),
                pct: 80,
                text: "80%".into(),
                background: "conic-gradient(#4ea1ff 80%, #20252e 80%)".into(),
            });
        }
        let v = render_json(&page).unwrap();
        assert_json_include!(
            actual: v,
            expected: json!({
                "title": "Risk",
                "containers": [{
                    "id": "domain-donuts",
                    "layout": "donuts",
                    "nodes": [{"kind": "donut", "label": "IAM", "pct": 80, "text": "80%"}]
                }],
                "sources": []
            })
        );
    }
}
