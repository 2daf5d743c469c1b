#![allow(missing_docs)]
use crate::{ArrayTable, DuplicatePolicy, OrdComparator, TableConfig};
use rand::prelude::*;
use std::{cell::RefCell, fmt::Debug, rc::Rc};

type Released<T> = Rc<RefCell<Vec<T>>>;

/// Runs every operation on an [`ArrayTable`] and on a plain `Vec` using `swap_remove`, which
/// has exactly the slot semantics the table promises.
struct CheckedTable<K: 'static, V: 'static> {
    dut: ArrayTable<K, V, OrdComparator>,
    ref_items: Vec<(K, V)>,
    policy: DuplicatePolicy,
    released_keys: Released<K>,
    released_values: Released<V>,
}

impl<K: Ord + Clone + Debug + 'static, V: Eq + Clone + Debug + 'static> CheckedTable<K, V> {
    fn new(policy: DuplicatePolicy) -> Self {
        let config = TableConfig {
            duplicates: policy,
            ..TableConfig::default()
        };
        let mut dut = ArrayTable::with_config(OrdComparator, config).unwrap();
        let released_keys: Released<K> = Default::default();
        let released_values: Released<V> = Default::default();
        let sink = released_keys.clone();
        dut.set_key_destructor(move |key| sink.borrow_mut().push(key));
        let sink = released_values.clone();
        dut.set_value_destructor(move |value| sink.borrow_mut().push(value));
        CheckedTable {
            dut,
            ref_items: vec![],
            policy,
            released_keys,
            released_values,
        }
    }
    fn len(&self) -> usize {
        self.ref_items.len()
    }
    fn ref_position(&self, key: &K) -> Option<usize> {
        self.ref_items.iter().position(|(k, _)| k == key)
    }
    fn expect_released(&self, key: Option<K>, value: Option<V>) {
        assert_eq!(self.released_keys.borrow_mut().pop(), key);
        assert_eq!(self.released_values.borrow_mut().pop(), value);
        assert!(self.released_keys.borrow().is_empty());
        assert!(self.released_values.borrow().is_empty());
    }
    fn lookup(&mut self, key: &K) -> Option<&V> {
        let ref_result = self.ref_position(key).map(|index| &self.ref_items[index].1);
        let dut_result = self.dut.lookup(key);
        assert_eq!(ref_result, dut_result);
        assert_eq!(self.dut.contains_key(key), ref_result.is_some());
        dut_result
    }
    fn get_index(&mut self, index: usize) -> Option<(&K, &V)> {
        let ref_result = self.ref_items.get(index).map(|(k, v)| (k, v));
        let dut_result = self.dut.get_index(index);
        assert_eq!(ref_result, dut_result);
        dut_result
    }
    fn insert(&mut self, key: K, value: V) {
        let replaced = match (self.policy, self.ref_position(&key)) {
            (DuplicatePolicy::Replace, Some(index)) => {
                Some(std::mem::replace(&mut self.ref_items[index], (key.clone(), value.clone())))
            }
            _ => {
                self.ref_items.push((key.clone(), value.clone()));
                None
            }
        };
        self.dut.insert(key, value).unwrap();
        let (old_key, old_value) = replaced.unzip();
        self.expect_released(old_key, old_value);
    }
    fn remove(&mut self, key: &K) -> bool {
        let ref_result = self.ref_position(key).map(|index| self.ref_items.swap_remove(index));
        let dut_result = self.dut.remove(key);
        assert_eq!(ref_result.is_some(), dut_result);
        let (old_key, old_value) = ref_result.unzip();
        self.expect_released(old_key, old_value);
        dut_result
    }
    fn take(&mut self, key: &K) -> Option<(K, V)> {
        let ref_result = self.ref_position(key).map(|index| self.ref_items.swap_remove(index));
        let dut_result = self.dut.take(key);
        assert_eq!(ref_result, dut_result);
        self.expect_released(None, None);
        dut_result
    }
    fn swap_remove_index(&mut self, index: usize) -> Option<(K, V)> {
        let ref_result = (index < self.ref_items.len()).then(|| self.ref_items.swap_remove(index));
        let dut_result = self.dut.swap_remove_index(index);
        assert_eq!(ref_result, dut_result);
        dut_result
    }
    fn clear(&mut self) {
        let (keys, values): (Vec<K>, Vec<V>) = std::mem::take(&mut self.ref_items).into_iter().unzip();
        self.dut.clear();
        assert_eq!(std::mem::take(&mut *self.released_keys.borrow_mut()), keys);
        assert_eq!(std::mem::take(&mut *self.released_values.borrow_mut()), values);
        assert!(self.dut.is_empty());
    }
    fn check(&mut self) {
        self.dut.check();
        assert_eq!(self.dut.len(), self.ref_items.len());
        assert_eq!(self.dut.is_empty(), self.ref_items.is_empty());
        assert_eq!(
            self.dut.last_occupied_index(),
            self.ref_items.len().checked_sub(1)
        );
        assert!(Iterator::eq(
            self.ref_items.iter().map(|(k, v)| (k, v)),
            self.dut.iter()
        ));
        assert!(Iterator::eq(self.ref_items.iter().map(|(k, _)| k), self.dut.keys()));
        assert!(Iterator::eq(self.ref_items.iter().map(|(_, v)| v), self.dut.values()));
    }
    fn free(self) {
        let (keys, values): (Vec<K>, Vec<V>) = self.ref_items.into_iter().unzip();
        self.dut.free();
        assert_eq!(*self.released_keys.borrow(), keys);
        assert_eq!(*self.released_values.borrow(), values);
    }
    fn present_or_random_key<R: Rng + SeedableRng>(
        &self,
        random_likelihood: f64,
        rng: &mut R,
        mut rand_k: impl FnMut(&mut R) -> K,
    ) -> K {
        debug_assert!(random_likelihood >= 0.0);
        if self.len() == 0 || rng.gen_range(0.0..1.0 + random_likelihood) >= 1.0 {
            rand_k(rng)
        } else {
            self.ref_items.iter().choose(rng).unwrap().0.clone()
        }
    }
    fn random_index<R: Rng + SeedableRng>(&self, error_likelihood: f64, rng: &mut R) -> usize {
        let max = (self.len() as f64 * (1.0 + error_likelihood)).ceil() as usize;
        rng.gen_range(0..=max)
    }
}

macro_rules! weighted_choose {
    ($rng:expr, $($name:ident: $weight:expr => $body:expr),+) => {
        {
            enum Branches { $( $name,  )* }
            let weights = [$((Branches::$name, $weight)),+];
            match weights.choose_weighted($rng, |x| x.1).unwrap().0 {
                $(Branches::$name => $body),*
            }
        }
    }
}

fn test_suite<K, V, R>(
    policy: DuplicatePolicy,
    seed: u64,
    mut rand_k: impl FnMut(&mut R) -> K,
    mut rand_v: impl FnMut(&mut R) -> V,
) where
    K: Ord + Clone + Debug + 'static,
    V: Eq + Clone + Debug + 'static,
    R: Rng + SeedableRng,
{
    let mut table: CheckedTable<K, V> = CheckedTable::new(policy);
    let mut rng = R::seed_from_u64(seed);
    let mut max_size = 0;
    let verbosity = 1;
    for _ in 0..3000 {
        weighted_choose! {&mut rng,
            Insert: 2.0 => {
                let k = table.present_or_random_key(3.0, &mut rng, &mut rand_k);
                let v = rand_v(&mut rng);
                table.insert(k.clone(), v.clone());
                if verbosity > 0 {
                    println!("inserting {k:?}: {v:?}");
                }
            },
            Lookup: 1.0 => {
                let k = table.present_or_random_key(1.0, &mut rng, &mut rand_k);
                let result = table.lookup(&k);
                if verbosity > 0 {
                    println!("looking up {k:?} -> {result:?}");
                }
            },
            GetIndex: 0.3 => {
                let index = table.random_index(0.1, &mut rng);
                let result = table.get_index(index);
                if verbosity > 0 {
                    println!("getting index {index:?} -> {result:?}");
                }
            },
            Remove: 1.0 => {
                let k = table.present_or_random_key(0.5, &mut rng, &mut rand_k);
                let result = table.remove(&k);
                if verbosity > 0 {
                    println!("removing {k:?} -> {result:?}");
                }
            },
            Take: 0.3 => {
                let k = table.present_or_random_key(0.5, &mut rng, &mut rand_k);
                let result = table.take(&k);
                if verbosity > 0 {
                    println!("taking {k:?} -> {result:?}");
                }
            },
            RemoveIndex: 0.2 => {
                let index = table.random_index(0.1, &mut rng);
                let result = table.swap_remove_index(index);
                if verbosity > 0 {
                    println!("removing index {index:?} -> {result:?}");
                }
            },
            Clear: 0.01 => {
                let old_len = table.len();
                table.clear();
                if verbosity > 0 {
                    println!("clearing {old_len} elements");
                }
            },
            Check: 0.15 => {
                table.check();
            }
        };
        max_size = std::cmp::max(max_size, table.len());
    }
    table.check();
    println!("max size {max_size}");
    table.free();
}

#[test]
fn test_suite_append_u8_u32() {
    test_suite::<u8, u32, rand_pcg::Pcg64>(
        DuplicatePolicy::Append,
        39,
        |rng| rng.gen_range(0..64),
        |rng| rng.gen(),
    );
}

#[test]
fn test_suite_replace_u8_u32() {
    test_suite::<u8, u32, rand_pcg::Pcg64>(
        DuplicatePolicy::Replace,
        40,
        |rng| rng.gen_range(0..64),
        |rng| rng.gen(),
    );
}

#[test]
fn test_suite_append_string_string() {
    test_suite::<String, String, rand_pcg::Pcg64>(
        DuplicatePolicy::Append,
        41,
        |rng| {
            let len = rng.gen_range(1..3);
            String::from_iter((0..len).map(|_| rng.gen_range('a'..'h')))
        },
        |rng| {
            let len = rng.gen_range(4..12);
            String::from_iter((0..len).map(|_| rng.gen_range('!'..'~')))
        },
    );
}

#[test]
fn test_suite_replace_boxed_u16_boxed_u64() {
    test_suite::<Box<u16>, Box<u64>, rand_pcg::Pcg64>(
        DuplicatePolicy::Replace,
        42,
        |rng| Box::new(rng.gen_range(0..200)),
        |rng| Box::new(rng.gen()),
    );
}

#[test]
fn insert_failure_leaves_table_unchanged() {
    let config = TableConfig {
        store: crate::StoreConfig {
            initial_capacity: 2,
            max_capacity: Some(2),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut table = ArrayTable::with_config(OrdComparator, config).unwrap();
    let destroyed = Rc::new(RefCell::new(0));
    let sink = destroyed.clone();
    table.set_value_destructor(move |_: u32| *sink.borrow_mut() += 1);
    table.insert(1, 10).unwrap();
    table.insert(2, 20).unwrap();
    assert_eq!(
        table.insert(3, 30),
        Err(crate::TableError::Store(crate::StoreError::CapacityExceeded {
            index: 2,
            limit: 2
        }))
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup(&3), None);
    assert_eq!(*destroyed.borrow(), 0);
    table.check();

    assert!(table.remove(&1));
    table.insert(3, 30).unwrap();
    assert_eq!(table.lookup(&3), Some(&30));
    assert_eq!(*destroyed.borrow(), 1);
}

#[test]
fn destructors_only_affect_later_removals() {
    let mut table: ArrayTable<u32, String> = ArrayTable::default();
    table.insert(1, "one".into()).unwrap();
    assert!(table.remove(&1));

    let released = Rc::new(RefCell::new(vec![]));
    let sink = released.clone();
    table.set_value_destructor(move |value| sink.borrow_mut().push(value));
    table.insert(2, "two".into()).unwrap();
    table.insert(3, "three".into()).unwrap();
    assert!(table.remove(&2));
    assert_eq!(*released.borrow(), ["two"]);
    drop(table);
    assert_eq!(*released.borrow(), ["two", "three"]);
}

#[test]
fn take_bypasses_destructors() {
    let mut table: ArrayTable<u32, u32> = ArrayTable::default();
    let calls = Rc::new(RefCell::new(0));
    let sink = calls.clone();
    table.set_key_destructor(move |_| *sink.borrow_mut() += 1);
    table.insert(5, 50).unwrap();
    table.insert(6, 60).unwrap();
    assert_eq!(table.take(&5), Some((5, 50)));
    assert_eq!(table.take(&5), None);
    assert_eq!(table.get_index(0), Some((&6, &60)));
    assert_eq!(*calls.borrow(), 0);
    table.free();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn lookup_mut_updates_first_match() {
    let mut table: ArrayTable<&str, u32> = ArrayTable::default();
    table.insert("a", 1).unwrap();
    table.insert("a", 2).unwrap();
    *table.lookup_mut(&"a").unwrap() += 10;
    assert_eq!(table.values().copied().collect::<Vec<_>>(), [11, 2]);
    assert_eq!(table.lookup_mut(&"b"), None);
}
