use chrono::{DateTime, Utc};
use rand::Rng;

/// 订单号: `ORD` + 毫秒时间戳 + 3 位随机数
pub fn generate_order_number<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> String {
    format!("ORD{}{:03}", now.timestamp_millis(), rng.gen_range(0..1000))
}
