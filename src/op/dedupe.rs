use crate::pipe::{Pipe, staged};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use std::hash::Hash;

impl<'a, T: 'a> Pipe<'a, T> {
    /// 按照`identify(&item)`得到的键去重。
    ///
    /// 完整遍历一次剩余的元素：键首次出现时保存元素；键重复时计算`merge(&existing, item)`，
    /// 返回`None`保留已保存的元素，返回`Some`则替换之（位置不变）。
    /// 返回按键首次出现顺序产出保存结果的新流水线。
    pub fn dedupe_with<K, I, M>(&mut self, mut identify: I, mut merge: M) -> Pipe<'a, T>
    where
        K: Hash + Eq + 'a,
        I: FnMut(&T) -> K,
        M: FnMut(&T, T) -> Option<T>,
    {
        let mut table: IndexMap<K, T, FxBuildHasher> = IndexMap::default();
        let mut merged = 0;
        for item in self.iter.by_ref() {
            match table.entry(identify(&item)) {
                Entry::Occupied(mut entry) => {
                    if let Some(value) = merge(entry.get(), item) {
                        entry.insert(value);
                        merged += 1;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(item);
                }
            }
        }
        self.trace(|| format!("dedupe: {} key(s), {merged} merge(s)", table.len()));
        staged(self.configs, "dedupe", table.into_values())
    }

    /// 按照键去重，保留首次出现的元素。
    pub fn dedupe_by<K, I>(&mut self, identify: I) -> Pipe<'a, T>
    where
        K: Hash + Eq + 'a,
        I: FnMut(&T) -> K,
    {
        self.dedupe_with(identify, |_, _| None)
    }
}

impl<'a, T: Hash + Eq + 'a> Pipe<'a, T> {
    /// 以元素自身为键去重，保留首次出现的元素。
    pub fn dedupe(&mut self) -> Pipe<'a, T> {
        let seen: IndexSet<T, FxBuildHasher> = self.iter.by_ref().collect();
        staged(self.configs, "dedupe", seen.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use crate::item::Item;
    use crate::pipe::Pipe;
    use crate::{list, record};
    use std::cell::Cell;
    use std::rc::Rc;

    fn users() -> Vec<Item> {
        vec![
            record! { "id" => 1, "v" => "a" },
            record! { "id" => 2, "v" => "b" },
            record! { "id" => 1, "v" => "c" },
        ]
    }

    #[test]
    fn test_dedupe_keep_first() {
        let unique = Pipe::new(users()).dedupe_by(|user| user.get("id").cloned()).sink_vec();
        assert_eq!(vec![record! { "id" => 1, "v" => "a" }, record! { "id" => 2, "v" => "b" }], unique);
    }

    #[test]
    fn test_dedupe_merge_replaces_in_place() {
        let merged = Pipe::new(users())
            .dedupe_with(|user| user.get("id").cloned(), |_, newer| Some(newer))
            .sink_vec();
        assert_eq!(vec![record! { "id" => 1, "v" => "c" }, record! { "id" => 2, "v" => "b" }], merged);

        let summed = Pipe::new(vec![("a", 1), ("b", 2), ("a", 3), ("a", 4)])
            .dedupe_with(|(key, _)| *key, |(key, total), (_, value)| Some((*key, total + value)))
            .sink_vec();
        assert_eq!(vec![("a", 8), ("b", 2)], summed);
    }

    #[test]
    fn test_dedupe_merge_none_keeps_existing() {
        let merges = Rc::new(Cell::new(0));
        let counter = merges.clone();
        let kept = Pipe::new(vec![3, 13, 23, 4])
            .dedupe_with(
                |item| item % 10,
                move |existing, newer| {
                    counter.set(counter.get() + 1);
                    (newer > 20).then_some(existing + newer)
                },
            )
            .sink_vec();
        assert_eq!(vec![26, 4], kept);
        assert_eq!(2, merges.get());
    }

    #[test]
    fn test_dedupe_identity() {
        assert_eq!(vec![3, 1, 2], Pipe::new(vec![3, 1, 3, 2, 1]).dedupe().sink_vec());
        let items = Pipe::new(vec![list![1], Item::from(1), list![1]]).dedupe().sink_vec();
        assert_eq!(vec![list![1], Item::from(1)], items);
        assert!(Pipe::new(Vec::<i32>::new()).dedupe().sink_vec().is_empty());
    }

    #[test]
    fn test_dedupe_drains_source() {
        let mut pipe = Pipe::new(vec![1, 1, 2]);
        let mut unique = pipe.dedupe();
        assert_eq!(0, pipe.count());
        assert_eq!(vec![1, 2], unique.sink_vec());
    }
}
