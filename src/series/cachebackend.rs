// ── cache_backend.rs ────────────────────────────────────────────────────────

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::RwLock;

/// 係數快取的抽象:查詢 + 計算並存入。
///
/// # Cache key 設計:展開中心的位元模式(f64::to_bits)
///
/// 中心是「值」而非物件,同一個中心必然對應同一組係數,
/// 不需要 pointer identity;以位元模式當 key 可避免 f64 不是 `Eq`/`Hash`
/// 的問題,而且 0.0 與 -0.0、不同 NaN 各自分開,正好符合
/// 「同一位元模式 ⟹ 同一組樣本點」的語意。
///
/// 截斷階數 n 在建構後不可變,因此快取永遠不需要失效;
/// 換一個 n 就是換一個元件實例,連同全新的快取。
pub trait CoefficientCache {
    fn get_or_compute(&self, center_bits: u64, compute: impl FnOnce() -> Vec<f64>) -> Vec<f64>;
}

// ── 單執行緒版:RefCell ──────────────────────────────────────────────────────

pub struct RefCellBackend {
    inner: RefCell<HashMap<u64, Vec<f64>>>,
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(HashMap::new()),
        }
    }
}

impl Default for RefCellBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CoefficientCache for RefCellBackend {
    fn get_or_compute(&self, center_bits: u64, compute: impl FnOnce() -> Vec<f64>) -> Vec<f64> {
        self.inner
            .borrow_mut()
            .entry(center_bits)
            .or_insert_with(compute)
            .clone()
    }
}

// ── 多執行緒版:RwLock ───────────────────────────────────────────────────────
//
// # 已知 trade-off:double-compute
//
// 讀鎖與寫鎖之間,兩條執行緒可能都發現 key 不存在而各自計算。
// 同一中心的係數具確定性,雙重計算只是浪費而非錯誤;
// `or_insert` 保證最終只留一份。

pub struct RwLockBackend {
    inner: RwLock<HashMap<u64, Vec<f64>>>,
}

impl RwLockBackend {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for RwLockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CoefficientCache for RwLockBackend {
    fn get_or_compute(&self, center_bits: u64, compute: impl FnOnce() -> Vec<f64>) -> Vec<f64> {
        if let Some(coefficients) = self.inner.read().unwrap().get(&center_bits) {
            return coefficients.clone();
        }

        let coefficients = compute();
        self.inner
            .write()
            .unwrap()
            .entry(center_bits)
            .or_insert(coefficients)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn refcell_backend_computes_each_center_once() {
        let backend = RefCellBackend::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            vec![1.0, 2.0]
        };

        assert_eq!(backend.get_or_compute(1.0f64.to_bits(), compute), vec![1.0, 2.0]);
        assert_eq!(
            backend.get_or_compute(1.0f64.to_bits(), || {
                calls.set(calls.get() + 1);
                vec![9.0]
            }),
            vec![1.0, 2.0]
        );
        assert_eq!(calls.get(), 1);

        // 不同中心各自計算
        backend.get_or_compute(2.0f64.to_bits(), || {
            calls.set(calls.get() + 1);
            vec![3.0]
        });
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn rwlock_backend_is_shareable_across_threads() {
        let backend = RwLockBackend::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let coefficients =
                        backend.get_or_compute(0.5f64.to_bits(), || vec![0.5, 0.25]);
                    assert_eq!(coefficients, vec![0.5, 0.25]);
                });
            }
        });
    }
}
