//! # Result Collector Module / 结果收集器模块
//!
//! An ordered, append-only list of test outcomes for one session.
//!
//! Test cases run one at a time, so appends are single-threaded. The collector
//! is only mutated through `&mut self` and holds no lock; sharing it between
//! threads requires the caller to wrap it.
//!
//! 一个会话中测试结果的有序、仅追加列表。
//! 测试用例逐个运行，因此追加是单线程的。收集器只能通过 `&mut self` 修改且不持有锁；
//! 若需跨线程共享，须由调用方自行包装。

use crate::core::models::TestOutcome;

#[derive(Debug, Default)]
pub struct ResultCollector {
    outcomes: Vec<TestOutcome>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome. Prior entries are never modified or deduplicated.
    /// 追加一个结果。已有条目不会被修改或去重。
    pub fn record(&mut self, outcome: TestOutcome) {
        self.outcomes.push(outcome);
    }

    /// Hands over every recorded outcome in order, leaving the collector empty.
    /// 按顺序交出所有已记录的结果，收集器随之清空。
    pub fn drain(&mut self) -> Vec<TestOutcome> {
        std::mem::take(&mut self.outcomes)
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_record_keeps_order_and_duplicates() {
        let mut collector = ResultCollector::new();
        collector.record(TestOutcome::passed("login", Duration::from_secs(1)));
        collector.record(TestOutcome::failed("cart", Duration::from_secs(2), "empty cart"));
        collector.record(TestOutcome::passed("login", Duration::from_secs(1)));

        let names: Vec<_> = collector.outcomes().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["login", "cart", "login"]);
        assert_eq!(collector.len(), 3);
    }

    #[test]
    fn test_drain_empties_collector() {
        let mut collector = ResultCollector::new();
        collector.record(TestOutcome::passed("search", Duration::from_millis(300)));

        let drained = collector.drain();
        assert_eq!(drained.len(), 1);
        assert!(collector.is_empty());
        assert!(collector.drain().is_empty());
    }
}
