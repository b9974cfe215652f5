//! Invoice output: the JSON export document and a plain-text summary.

use crate::types::Invoice;

impl Invoice {
    /// The export document, pretty-printed with two-space indentation.
    ///
    /// Field order is fixed by the struct: origin, destination, distance_km,
    /// items, subtotal, trailer_required, trailer_cost, total_cost.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary. Trailer lines appear only when a trailer is
    /// required.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Origin: {}", self.origin()),
            format!("Destination: {}", self.destination()),
            format!("Distance: {} km", self.distance_km()),
            String::new(),
            "Items:".to_string(),
        ];

        for item in self.items() {
            lines.push(format!(
                "  • {} (x{}) - Weight: {} - Cost: {}",
                item.name, item.quantity, item.weight_score, item.item_cost
            ));
        }

        lines.push(String::new());
        lines.push(format!("Subtotal: {}", self.subtotal()));

        if self.trailer_required() {
            lines.push("Trailer Required: Yes".to_string());
            lines.push(format!("Trailer Cost: {}", self.trailer_cost()));
        }

        lines.push(format!("Total Cost: {}", self.total_cost()));
        lines.join("\n")
    }
}
