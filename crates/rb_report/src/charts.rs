//! Bar charts and donut indicators. Both clear their container first, so
//! rendering twice gives the same result as rendering once.

use rb_core::rounding::display_number;
use rb_io::ordered::Ordered;

use crate::structure::{bars, donuts};
use crate::surface::{Container, Node};

/// One bar per `(domain, fraction)`. An absent mapping just clears.
pub fn render_bar_chart(domains: Option<&Ordered<f64>>, container: Option<&mut Container>) {
    let Some(c) = container else {
        return;
    };
    c.clear();
    let Some(domains) = domains else {
        return;
    };
    for b in bars(domains) {
        c.push(Node::Bar {
            width: format!("{}%", display_number(b.width_pct)),
            label: b.label,
            width_pct: b.width_pct,
            fill: b.fill,
        });
    }
}

pub fn render_domain_donuts(
    coverage: Option<&Ordered<f64>>,
    effectiveness: Option<&Ordered<f64>>,
    container: Option<&mut Container>,
) {
    let Some(c) = container else {
        return;
    };
    c.clear();
    for d in donuts(coverage, effectiveness) {
        c.push(Node::Donut {
            background: d.background(),
            text: format!("{}%", d.pct),
            pct: d.pct,
            label: d.label,
        });
    }
}
