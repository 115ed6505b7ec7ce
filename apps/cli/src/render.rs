//! Text rendering of the storefront screens.
//!
//! ```text
//! Loading...                         (while a cycle is in flight)
//!
//! ┌ Fjallraven Foldsack No 1 Backpack,... ┐ ┌ Mens Casual Premium Slim Fit... ┐
//! │ $109.95                               │ │ $22.30                          │
//! └ #1  https://...                       ┘ └ #2  https://...                 ┘
//! ```

use std::fmt::Write as _;

use storefront_core::catalog::{product_grid, Acknowledgement};
use storefront_core::{Cart, CoreResult, LoadState, ProductCard, GRID_COLUMNS};

/// Width of one grid cell, borders excluded.
const CELL_WIDTH: usize = 36;

/// Renders a load state: the status line, or the product grid when ready.
pub fn render_state(state: &LoadState) -> String {
    match state {
        LoadState::Ready(catalog) if catalog.is_empty() => "No products.".to_string(),
        LoadState::Ready(catalog) => render_grid(&product_grid(&catalog.products)),
        other => other.status_text().unwrap_or_default().to_string(),
    }
}

/// Renders rows of cards side by side.
pub fn render_grid(rows: &[Vec<ProductCard>]) -> String {
    let mut out = String::new();
    for row in rows {
        let cells: Vec<[String; 3]> = row.iter().map(card_cell).collect();
        for line in 0..3 {
            let joined: Vec<&str> = cells.iter().map(|c| c[line].as_str()).collect();
            out.push_str(joined.join(" ").trim_end());
            out.push('\n');
        }
    }
    out
}

fn card_cell(card: &ProductCard) -> [String; 3] {
    let footer = if card.image_url.is_empty() {
        format!("#{}", card.id)
    } else {
        format!("#{}  {}", card.id, card.image_url)
    };

    [
        format!("┌ {} ┐", fit(&card.title)),
        format!("│ {} │", fit(&card.price_label)),
        format!("└ {} ┘", fit(&footer)),
    ]
}

/// Pads or clips `text` to exactly `CELL_WIDTH` characters.
fn fit(text: &str) -> String {
    let count = text.chars().count();
    if count > CELL_WIDTH {
        let clipped: String = text.chars().take(CELL_WIDTH - 1).collect();
        format!("{}…", clipped)
    } else {
        format!("{}{}", text, " ".repeat(CELL_WIDTH - count))
    }
}

/// Renders the add-to-cart notice.
pub fn render_ack(ack: &Acknowledgement) -> String {
    format!("{}\n{}", ack.title, ack.body)
}

/// Renders the cart lines and the total.
pub fn render_cart(cart: &Cart) -> CoreResult<String> {
    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(out, "{:<40} {:>10}", line.title, line.price_label);
    }
    let _ = writeln!(out, "{}", cart.total_label()?);
    Ok(out)
}

/// Cards per grid row, for the summary line.
pub fn rows_for(count: usize) -> usize {
    count.div_ceil(GRID_COLUMNS)
}
