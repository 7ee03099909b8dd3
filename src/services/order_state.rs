use crate::entities::OrderStatus;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderEvent {
    Pay,
    Cancel,
    Complete,
}

impl std::fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderEvent::Pay => write!(f, "pay"),
            OrderEvent::Cancel => write!(f, "cancel"),
            OrderEvent::Complete => write!(f, "complete"),
        }
    }
}

/// 订单状态流转表 (from × event -> to)
///
/// processing / refunded 不在表中：保留状态，不可进入也不可离开
pub const TRANSITIONS: &[(OrderStatus, OrderEvent, OrderStatus)] = &[
    (OrderStatus::Pending, OrderEvent::Pay, OrderStatus::Paid),
    (OrderStatus::Pending, OrderEvent::Cancel, OrderStatus::Cancelled),
    (OrderStatus::Paid, OrderEvent::Complete, OrderStatus::Completed),
];

pub fn next_status(from: OrderStatus, event: OrderEvent) -> AppResult<OrderStatus> {
    TRANSITIONS
        .iter()
        .find(|(f, e, _)| *f == from && *e == event)
        .map(|(_, _, to)| *to)
        .ok_or_else(|| AppError::InvalidState(rejection_message(from, event)))
}

fn rejection_message(from: OrderStatus, event: OrderEvent) -> String {
    match (from, event) {
        (OrderStatus::Completed, OrderEvent::Complete) => "Order has already been drawn".into(),
        (OrderStatus::Pending, OrderEvent::Complete) => "Order has not been paid yet".into(),
        (_, OrderEvent::Cancel) => format!("Order cannot be cancelled in status {from}"),
        (_, OrderEvent::Pay) => format!("Order cannot be paid in status {from}"),
        _ => format!("Order cannot {event} in status {from}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_happy_path() {
        assert_eq!(
            next_status(OrderStatus::Pending, OrderEvent::Pay).unwrap(),
            OrderStatus::Paid
        );
        assert_eq!(
            next_status(OrderStatus::Paid, OrderEvent::Complete).unwrap(),
            OrderStatus::Completed
        );
        assert_eq!(
            next_status(OrderStatus::Pending, OrderEvent::Cancel).unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_cancel_only_from_pending() {
        for status in [
            OrderStatus::Paid,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let err = next_status(status, OrderEvent::Cancel).unwrap_err();
            assert!(matches!(err, AppError::InvalidState(_)));
        }
    }

    #[test]
    fn test_reserved_states_unreachable() {
        for (from, event, to) in TRANSITIONS {
            assert_ne!(*to, OrderStatus::Processing);
            assert_ne!(*to, OrderStatus::Refunded);
            assert_ne!(*from, OrderStatus::Processing);
            assert_ne!(*from, OrderStatus::Refunded);
            assert!(next_status(*from, *event).is_ok());
        }
        for event in [OrderEvent::Pay, OrderEvent::Cancel, OrderEvent::Complete] {
            assert!(next_status(OrderStatus::Processing, event).is_err());
            assert!(next_status(OrderStatus::Refunded, event).is_err());
        }
    }

    #[test]
    fn test_only_three_legal_transitions() {
        let legal = OrderStatus::iter()
            .flat_map(|s| {
                [OrderEvent::Pay, OrderEvent::Cancel, OrderEvent::Complete]
                    .into_iter()
                    .map(move |e| (s, e))
            })
            .filter(|(s, e)| next_status(*s, *e).is_ok())
            .count();
        assert_eq!(legal, 3);
    }

    #[test]
    fn test_double_draw_message() {
        let err = next_status(OrderStatus::Completed, OrderEvent::Complete).unwrap_err();
        assert_eq!(err.to_string(), "Invalid state: Order has already been drawn");
    }
}
