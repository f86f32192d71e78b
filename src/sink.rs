use crate::PipeRes;
use crate::err::PipeErr;
use crate::pipe::Pipe;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use rustc_hash::FxBuildHasher;
use std::fmt::Display;
use std::hash::Hash;

/// 可以拆分为键值对的元素，用于汇聚为映射或记录。
pub trait IntoEntry<K, V> {
    /// 不构成键值对时返回`None`。
    fn into_entry(self) -> Option<(K, V)>;
}

impl<K, V> IntoEntry<K, V> for (K, V) {
    fn into_entry(self) -> Option<(K, V)> {
        Some(self)
    }
}

impl<'a, T: 'a> Pipe<'a, T> {
    /// 按顺序收集剩余的所有元素。
    pub fn sink_vec(&mut self) -> Vec<T> {
        let vec = self.iter.by_ref().collect_vec();
        self.trace(|| format!("sink_vec: {} item(s)", vec.len()));
        vec
    }

    /// 收集为映射：重复的键保留首次出现的位置，值为最后一次出现的值。
    pub fn sink_map<K, V>(&mut self) -> PipeRes<IndexMap<K, V, FxBuildHasher>>
    where
        T: IntoEntry<K, V>,
        K: Hash + Eq,
    {
        let mut map: IndexMap<K, V, FxBuildHasher> = IndexMap::default();
        for (index, item) in self.iter.by_ref().enumerate() {
            let (key, value) = item.into_entry().ok_or(PipeErr::NotAnEntry { index })?;
            map.insert(key, value);
        }
        self.trace(|| format!("sink_map: {} key(s)", map.len()));
        Ok(map)
    }

    /// 收集为以字符串为键的记录，键通过`Display`转换，其他规则与`sink_map`相同。
    pub fn sink_record<K, V>(&mut self) -> PipeRes<IndexMap<String, V, FxBuildHasher>>
    where
        T: IntoEntry<K, V>,
        K: Display,
    {
        let mut record: IndexMap<String, V, FxBuildHasher> = IndexMap::default();
        for (index, item) in self.iter.by_ref().enumerate() {
            let (key, value) = item.into_entry().ok_or(PipeErr::NotAnEntry { index })?;
            record.insert(key.to_string(), value);
        }
        self.trace(|| format!("sink_record: {} key(s)", record.len()));
        Ok(record)
    }
}

impl<'a, T: Hash + Eq + 'a> Pipe<'a, T> {
    /// 收集为集合，按照首次出现的顺序去重。
    pub fn sink_set(&mut self) -> IndexSet<T, FxBuildHasher> {
        let set: IndexSet<T, FxBuildHasher> = self.iter.by_ref().collect();
        self.trace(|| format!("sink_set: {} item(s)", set.len()));
        set
    }
}
