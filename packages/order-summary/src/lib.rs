//! Cart lines and order-total arithmetic for the review screen.
//!
//! Pure data and math. The screen that renders these totals lives in the
//! mobile app; this crate only answers what the order costs. Money is
//! integer cents throughout, never floating point.

use serde::{Deserialize, Serialize};

/// One menu item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

/// The cart as reviewed before submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSummary {
    lines: Vec<OrderLine>,
    /// Flat per-order service charge, in cents.
    pub service_charge_cents: i64,
}

impl OrderSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, merging quantities when the item is already in the cart.
    pub fn add_line(&mut self, line: OrderLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.item_id == line.item_id) {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Set an item's quantity; zero removes the line.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_line(item_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove_line(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of items across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(OrderLine::line_total_cents).sum()
    }

    /// What the customer pays. The service charge applies only when there is
    /// something to order; an empty cart totals zero.
    pub fn total_cents(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.subtotal_cents() + self.service_charge_cents
        }
    }
}

/// Render cents as a "12.34" display string.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: &str, unit_price_cents: i64, quantity: u32) -> OrderLine {
        OrderLine {
            item_id: item_id.to_string(),
            name: format!("item {item_id}"),
            unit_price_cents,
            quantity,
        }
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(line("flat-white", 450, 3).line_total_cents(), 1350);
    }

    #[test]
    fn subtotal_sums_all_lines() {
        let mut order = OrderSummary::new();
        order.add_line(line("flat-white", 450, 2));
        order.add_line(line("croissant", 380, 1));
        assert_eq!(order.subtotal_cents(), 1280);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn adding_the_same_item_merges_quantities() {
        let mut order = OrderSummary::new();
        order.add_line(line("flat-white", 450, 1));
        order.add_line(line("flat-white", 450, 2));
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].quantity, 3);
    }

    #[test]
    fn quantity_zero_removes_the_line() {
        let mut order = OrderSummary::new();
        order.add_line(line("croissant", 380, 2));
        order.set_quantity("croissant", 0);
        assert!(order.is_empty());
        assert_eq!(order.total_cents(), 0);
    }

    #[test]
    fn service_charge_applies_only_to_non_empty_orders() {
        let mut order = OrderSummary::new();
        order.service_charge_cents = 50;
        assert_eq!(order.total_cents(), 0);

        order.add_line(line("flat-white", 450, 1));
        assert_eq!(order.total_cents(), 500);
    }

    #[test]
    fn setting_quantity_of_an_unknown_item_is_a_no_op() {
        let mut order = OrderSummary::new();
        order.add_line(line("flat-white", 450, 1));
        order.set_quantity("espresso", 4);
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn format_cents_renders_two_decimal_places() {
        assert_eq!(format_cents(1280), "12.80");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-450), "-4.50");
    }

    #[test]
    fn lines_round_trip_through_the_menu_wire_shape() {
        let parsed: OrderLine = serde_json::from_str(
            r#"{"item_id":"flat-white","name":"Flat white","unit_price_cents":450,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(parsed.line_total_cents(), 900);
    }
}
