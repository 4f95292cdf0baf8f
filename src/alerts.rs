use crate::structs::QuantityChange;

/// Receiver for out-of-stock events. Fire-and-forget: implementations must
/// swallow their own delivery failures, nothing may raise back into the
/// adjustment call path.
pub trait StockAlertNotifier: Send + Sync {
    fn notify_zero_stock(&self, item_id: i64, sku: &str, name: &str);
}

/// Default notifier: emits a structured warn-level log record in place of
/// the mobile app's local notification.
#[derive(Debug, Default, Clone)]
pub struct LogStockAlert;

impl StockAlertNotifier for LogStockAlert {
    fn notify_zero_stock(&self, item_id: i64, sku: &str, name: &str) {
        log::warn!(
            "Out of stock: {}",
            serde_json::json!({ "id": item_id, "sku": sku, "name": name })
        );
    }
}

/// Notify once if this quantity write crossed from in stock to zero.
pub fn alert_on_zero_crossing(change: &QuantityChange, notifier: &dyn StockAlertNotifier) {
    if change.crossed_zero() {
        notifier.notify_zero_stock(change.id, &change.sku, &change.name);
    }
}
