use crate::error::{AppError, AppResult};
use rand::Rng;

/// 按权重随机抽取
///
/// 逻辑:
/// 1. 构造时校验权重 (不允许负数，合计必须 > 0)
/// 2. 在 `[0, total_weight)` 内取均匀随机数 `pick`
/// 3. 顺序累加权重，返回第一个累计值大于 `pick` 的候选
/// 4. 每次抽取独立且放回，权重不会因抽中而减少
///
/// 随机源由调用方注入，固定种子可以复现同一抽取序列。
#[derive(Debug, Clone)]
pub struct WeightedDrawEngine<T> {
    candidates: Vec<(T, u64)>,
    total_weight: u64,
}

impl<T: Clone> WeightedDrawEngine<T> {
    pub fn new<I>(candidates: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (T, i64)>,
    {
        let mut list = Vec::new();
        let mut total_weight: u64 = 0;

        for (candidate, weight) in candidates {
            if weight < 0 {
                return Err(AppError::ConfigurationError(format!(
                    "Drop weight must not be negative, got {weight}"
                )));
            }
            let weight = weight as u64;
            total_weight = total_weight.checked_add(weight).ok_or_else(|| {
                AppError::ConfigurationError("Total drop weight overflows".into())
            })?;
            list.push((candidate, weight));
        }

        if total_weight == 0 {
            return Err(AppError::ConfigurationError(
                "Total drop weight must be positive".into(),
            ));
        }

        Ok(Self {
            candidates: list,
            total_weight,
        })
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let pick = rng.gen_range(0..self.total_weight);
        let mut acc: u64 = 0;

        for (candidate, weight) in &self.candidates {
            acc += weight;
            if pick < acc {
                return candidate;
            }
        }

        // 累加未命中时退回最后一个候选 (total_weight > 0 保证列表非空)
        &self.candidates[self.candidates.len() - 1].0
    }

    /// 连续独立抽取 `count` 次
    pub fn draw_many<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<T> {
        (0..count).map(|_| self.draw(rng).clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn sample_engine() -> WeightedDrawEngine<&'static str> {
        WeightedDrawEngine::new(vec![
            ("common", 40),
            ("rare", 30),
            ("epic", 20),
            ("legendary", 10),
        ])
        .unwrap()
    }

    #[test]
    fn test_same_seed_reproduces_sequence() {
        let engine = sample_engine();
        let mut rng_a = StdRng::seed_from_u64(20250901);
        let mut rng_b = StdRng::seed_from_u64(20250901);

        let first = engine.draw_many(&mut rng_a, 100_000);
        let second = engine.draw_many(&mut rng_b, 100_000);

        assert_eq!(first.len(), 100_000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let engine = sample_engine();
        let first = engine.draw_many(&mut StdRng::seed_from_u64(1), 64);
        let second = engine.draw_many(&mut StdRng::seed_from_u64(2), 64);
        assert_ne!(first, second);
    }

    #[test]
    fn test_distribution_follows_weights() {
        let engine = sample_engine();
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 100_000;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(*engine.draw(&mut rng)).or_default() += 1;
        }

        for (name, expected) in [
            ("common", 0.40),
            ("rare", 0.30),
            ("epic", 0.20),
            ("legendary", 0.10),
        ] {
            let observed = counts.get(name).copied().unwrap_or(0) as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "{name}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_zero_weight_candidate_never_drawn() {
        let engine = WeightedDrawEngine::new(vec![("ghost", 0), ("only", 5), ("shadow", 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(*engine.draw(&mut rng), "only");
        }
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let err = WeightedDrawEngine::new(vec![(1i64, 0), (2, 0)]).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let err = WeightedDrawEngine::<i64>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = WeightedDrawEngine::new(vec![(1i64, 10), (2, -1)]).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn test_draw_many_with_replacement() {
        let engine = WeightedDrawEngine::new(vec![("solo", 1)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(engine.draw_many(&mut rng, 5), vec!["solo"; 5]);
        assert_eq!(engine.total_weight(), 1);
        assert_eq!(engine.len(), 1);
    }
}
