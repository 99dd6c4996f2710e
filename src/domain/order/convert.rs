//! Conversions: REST wire types → Order domain types.

use super::wire::{OrderResponse, OrderUpdate};
use super::Order;
use crate::domain::instrument::Instrument;

impl Order {
    /// Build an order from a full server record and its resolved instrument.
    pub fn from_wire(instrument: Instrument, record: OrderResponse) -> Self {
        Order {
            uuid: record.uuid,
            instrument_type: record.instrument_type.or(Some(instrument.instrument_type)),
            instrument,
            quantity: record.quantity,
            side: record.side,
            limit_price: record.limit_price,
            stop_price: record.stop_price,
            valid_until: record.valid_until,
            status: record.status,
            created_at: record.created_at,
            processed_at: record.processed_at,
            processed_quantity: record.processed_quantity,
            average_price: record.average_price,
            trading_venue: record.trading_venue,
        }
    }

    /// Overwrite the server-mutable fields. Fields the update omits keep
    /// their previous value; `status` is always replaced.
    pub fn apply_update(&mut self, update: OrderUpdate) {
        self.status = update.status;
        if update.created_at.is_some() {
            self.created_at = update.created_at;
        }
        if update.processed_at.is_some() {
            self.processed_at = update.processed_at;
        }
        if update.processed_quantity.is_some() {
            self.processed_quantity = update.processed_quantity;
        }
        if update.average_price.is_some() {
            self.average_price = update.average_price;
        }
        if update.instrument_type.is_some() {
            self.instrument_type = update.instrument_type;
        }
        if update.trading_venue.is_some() {
            self.trading_venue = update.trading_venue;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::InstrumentType;
    use crate::domain::order::OrderStatus;
    use rust_decimal::Decimal;

    fn instrument() -> Instrument {
        serde_json::from_value(serde_json::json!({"isin": "DE0007664039", "type": "stock"})).unwrap()
    }

    fn record() -> OrderResponse {
        serde_json::from_value(serde_json::json!({
            "uuid": "o-1",
            "status": "inactive",
            "quantity": 5,
            "side": "sell",
            "valid_until": 1633046400,
            "stop_price": "80.1"
        }))
        .unwrap()
    }

    #[test]
    fn test_from_wire() {
        let order = Order::from_wire(instrument(), record());
        assert_eq!(order.uuid, "o-1");
        assert_eq!(order.status, OrderStatus::Inactive);
        assert_eq!(order.instrument.isin, "DE0007664039");
        assert_eq!(order.stop_price, Some(Decimal::new(801, 1)));
        assert_eq!(order.instrument_type, Some(InstrumentType::Stock));
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut order = Order::from_wire(instrument(), record());
        order.processed_quantity = Some(2);

        let update: OrderUpdate = serde_json::from_value(serde_json::json!({
            "status": "executed",
            "average_price": 81.25,
            "processed_at": 1633050000
        }))
        .unwrap();
        order.apply_update(update);

        assert_eq!(order.status, OrderStatus::Executed);
        assert_eq!(order.average_price, Some(Decimal::new(8125, 2)));
        assert_eq!(order.processed_at.unwrap().timestamp(), 1_633_050_000);
        assert_eq!(order.processed_quantity, Some(2));
        assert_eq!(order.quantity, 5);
    }
}
