use crate::config::skip_err;
use crate::pipe::Pipe;
use itertools::Itertools;
use std::fmt::Display;

/// 元素是否为有效值，`some`据此判断`find`的结果。
///
/// 默认总是有效；`Option::None`和`Item::Undefined`表示缺失，被匹配到时`some`仍为假。
pub trait Defined {
    fn is_defined(&self) -> bool {
        true
    }
}

macro_rules! impl_defined {
    ($($ty:ty),* $(,)?) => {
        $(impl Defined for $ty {})*
    };
}

impl_defined!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str, String);

impl<T: Defined + ?Sized> Defined for &T {
    fn is_defined(&self) -> bool {
        (**self).is_defined()
    }
}

impl<T> Defined for Option<T> {
    fn is_defined(&self) -> bool {
        self.is_some()
    }
}

impl<T> Defined for Vec<T> {}

impl<K, V> Defined for (K, V) {}

impl<T, E> Defined for Result<T, E> {}

impl<'a, T: 'a> Pipe<'a, T> {
    /// 单次扫描：返回首个满足`predicate(&item, index)`的元素及其索引。
    ///
    /// 命中后立即停止，不会再从上游拉取元素。`find`、`find_index`、`includes`、`some`和`every`都基于此实现。
    pub fn find_with_index<P>(&mut self, mut predicate: P) -> Option<(usize, T)>
    where
        P: FnMut(&T, usize) -> bool,
    {
        let found = self.iter.by_ref().enumerate().find(|(index, item)| predicate(item, *index));
        self.trace(|| match &found {
            Some((index, _)) => format!("scan: matched at index {index}"),
            None => "scan: no match".to_owned(),
        });
        found
    }

    pub fn find<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.find_with_index(predicate).map(|(_, item)| item)
    }

    /// 首个满足条件的元素的索引，没有则返回`None`。
    pub fn find_index<P>(&mut self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.find_with_index(predicate).map(|(index, _)| index)
    }

    /// 索引不小于`from_index`的元素中是否存在与`value`相等的元素。
    pub fn includes(&mut self, value: &T, from_index: usize) -> bool
    where
        T: PartialEq,
    {
        self.find_with_index(|item, index| index >= from_index && item == value).is_some()
    }

    /// `find`找到有效的元素时为真；首个匹配的元素表示缺失时与没有匹配相同。
    pub fn some<P>(&mut self, predicate: P) -> bool
    where
        T: Defined,
        P: FnMut(&T, usize) -> bool,
    {
        self.find(predicate).is_some_and(|item| item.is_defined())
    }

    /// 所有元素都满足条件时为真，在首个不满足的元素处停止；没有元素时为真。
    pub fn every<P>(&mut self, mut predicate: P) -> bool
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.find_with_index(|item, index| !predicate(item, index)).is_none()
    }

    /// 从左到右折叠：`accumulator = combine(accumulator, item, index)`，没有元素时返回`initial`。
    pub fn reduce<A, F>(&mut self, mut combine: F, initial: A) -> A
    where
        F: FnMut(A, T, usize) -> A,
    {
        let mut pulled = 0;
        let accumulator = self.iter.by_ref().enumerate().fold(initial, |accumulator, (index, item)| {
            pulled += 1;
            combine(accumulator, item, index)
        });
        self.trace(|| format!("reduce: folded {pulled} item(s)"));
        accumulator
    }

    pub fn for_each<F>(&mut self, mut action: F)
    where
        F: FnMut(T, usize),
    {
        self.iter.by_ref().enumerate().for_each(|(index, item)| action(item, index));
        self.trace(|| "for_each: done".to_owned());
    }

    pub fn count(&mut self) -> usize {
        let count = self.iter.by_ref().count();
        self.trace(|| format!("count: {count} item(s)"));
        count
    }

    /// 以`delimiter`连接所有元素的字符串表示。
    pub fn join(&mut self, delimiter: &str) -> String
    where
        T: Display,
    {
        self.iter.by_ref().join(delimiter)
    }
}

/// 元素为`Result`的流水线，通常由`try_map`产生。
///
/// 默认在首个`Err`处停止并原样返回该错误；配置了`Config::SkipErr`时跳过错误元素。
/// 索引按源中的位置计数，包含错误元素。
impl<'a, T: 'a, E: 'a> Pipe<'a, Result<T, E>> {
    pub fn try_for_each<F>(&mut self, mut action: F) -> Result<(), E>
    where
        F: FnMut(T, usize),
    {
        let skip = skip_err(self.configs);
        for (index, item) in self.iter.by_ref().enumerate() {
            match item {
                Ok(item) => action(item, index),
                Err(_) if skip => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    pub fn try_reduce<A, F>(&mut self, mut combine: F, initial: A) -> Result<A, E>
    where
        F: FnMut(A, T, usize) -> A,
    {
        let skip = skip_err(self.configs);
        let mut accumulator = initial;
        for (index, item) in self.iter.by_ref().enumerate() {
            match item {
                Ok(item) => accumulator = combine(accumulator, item, index),
                Err(_) if skip => {}
                Err(err) => return Err(err),
            }
        }
        Ok(accumulator)
    }

    pub fn try_find<P>(&mut self, mut predicate: P) -> Result<Option<T>, E>
    where
        P: FnMut(&T, usize) -> bool,
    {
        let skip = skip_err(self.configs);
        for (index, item) in self.iter.by_ref().enumerate() {
            match item {
                Ok(item) if predicate(&item, index) => return Ok(Some(item)),
                Ok(_) => {}
                Err(_) if skip => {}
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }

    pub fn try_sink_vec(&mut self) -> Result<Vec<T>, E> {
        if skip_err(self.configs) {
            Ok(self.iter.by_ref().flatten().collect_vec())
        } else {
            self.iter.by_ref().collect()
        }
    }
}
