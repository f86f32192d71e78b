mod dedupe;
pub mod flat;

use crate::op::flat::{FlatIter, Nested};
use crate::pipe::{Pipe, staged};
use std::fmt::Debug;

/// `flat`的默认展开深度。
pub const DEFAULT_FLAT_DEPTH: usize = 1;

impl<'a, T: 'a> Pipe<'a, T> {
    /* **************************************** 转换 **************************************** */

    /// 惰性转换每个元素为`transform(item, index)`，索引从0开始按源中的位置计数。
    ///
    /// 只有当下游拉取元素时才会调用`transform`，其中的panic在拉取该元素时传播。
    pub fn map<U, F>(self, mut transform: F) -> Pipe<'a, U>
    where
        U: 'a,
        F: FnMut(T, usize) -> U + 'a,
    {
        let Pipe { iter, configs } = self;
        staged(configs, "map", iter.enumerate().map(move |(index, item)| transform(item, index)))
    }

    /// 与`map`相同，但转换可能失败，失败的结果作为`Err`元素流向下游，由`try_*`终结操作处理。
    pub fn try_map<U, E, F>(self, transform: F) -> Pipe<'a, Result<U, E>>
    where
        U: 'a,
        E: 'a,
        F: FnMut(T, usize) -> Result<U, E> + 'a,
    {
        self.map(transform)
    }

    /// 先`map`再按照指定深度`flat`。
    pub fn flat_map<U, F>(self, transform: F, depth: usize) -> Pipe<'a, U>
    where
        U: Nested + 'a,
        F: FnMut(T, usize) -> U + 'a,
    {
        self.map(transform).flat(depth)
    }

    /// 展开一层静态类型的嵌套，每个元素本身必须可迭代。
    pub fn flatten(self) -> Pipe<'a, T::Item>
    where
        T: IntoIterator,
        T::IntoIter: 'a,
        T::Item: 'a,
    {
        let Pipe { iter, configs } = self;
        staged(configs, "flatten", iter.flatten())
    }

    /* **************************************** 减少 **************************************** */

    /// 惰性保留`predicate(item, index)`为真的元素，索引按源中的位置计数（包含被丢弃的元素）。
    pub fn filter<F>(self, mut predicate: F) -> Pipe<'a, T>
    where
        F: FnMut(&T, usize) -> bool + 'a,
    {
        let Pipe { iter, configs } = self;
        staged(
            configs,
            "filter",
            iter.enumerate().filter(move |(index, item)| predicate(item, *index)).map(|(_, item)| item),
        )
    }

    /// 保留前`count`个元素，拉取到第`count`个元素后不再从上游拉取。
    pub fn take(self, count: usize) -> Pipe<'a, T> {
        let Pipe { iter, configs } = self;
        staged(configs, "take", iter.take(count))
    }

    /// 丢弃前`count`个元素。
    pub fn skip(self, count: usize) -> Pipe<'a, T> {
        let Pipe { iter, configs } = self;
        staged(configs, "skip", iter.skip(count))
    }

    /* **************************************** 访问 **************************************** */

    /// 元素经过时调用`action(&item, index)`，不改变元素。
    pub fn inspect<F>(self, mut action: F) -> Pipe<'a, T>
    where
        F: FnMut(&T, usize) + 'a,
    {
        let Pipe { iter, configs } = self;
        staged(
            configs,
            "inspect",
            iter.enumerate().inspect(move |(index, item)| action(item, *index)).map(|(_, item)| item),
        )
    }

    /// 元素经过时打印`index: item`到标准错误。
    pub fn peek(self) -> Pipe<'a, T>
    where
        T: Debug,
    {
        self.inspect(|item, index| println_peek!("{index}: {item:?}"))
    }
}

impl<'a, T: Nested + 'a> Pipe<'a, T> {
    /// 惰性展开可迭代的元素，最多展开`depth`层。
    ///
    /// `depth`为0时所有元素原样通过；不可迭代的元素在任意深度都原样通过。
    /// `depth`为`usize::MAX`时完全展开，`Nested::expand`需要对展开后仍是自身的元素返回`Err`。
    pub fn flat(self, depth: usize) -> Pipe<'a, T> {
        let Pipe { iter, configs } = self;
        staged(configs, &format!("flat({depth})"), FlatIter::new(iter, depth))
    }

    /// 按照默认深度`DEFAULT_FLAT_DEPTH`展开。
    pub fn flat_once(self) -> Pipe<'a, T> {
        self.flat(DEFAULT_FLAT_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::list;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let counter = Rc::new(Cell::new(0));
        (counter.clone(), counter)
    }

    #[test]
    fn test_chain_construction_is_lazy() {
        let (calls, observed) = counter();
        let pulled = Rc::new(Cell::new(0i32));
        let source_pulled = pulled.clone();
        let source = Pipe::from_fn(move || {
            source_pulled.set(source_pulled.get() + 1);
            Some(source_pulled.get())
        });
        let mut pipe = source
            .map(move |item, _| {
                calls.set(calls.get() + 1);
                item * 10
            })
            .filter(|item, _| item % 20 == 0)
            .flat_map(|item, _| list![item, item + 1], 1);
        assert_eq!(0, observed.get());
        assert_eq!(0, pulled.get());

        assert_eq!(Some(Item::from(20)), pipe.iter().next());
        assert_eq!(2, observed.get());
        assert_eq!(2, pulled.get());
        assert_eq!(Some(Item::from(21)), pipe.iter().next());
        assert_eq!(2, pulled.get());
    }

    #[test]
    fn test_map_laziness_with_find() {
        let (calls, observed) = counter();
        let mut pipe = Pipe::new(vec![1, 2, 3, 4, 5]).map(move |item, _| {
            calls.set(calls.get() + 1);
            item * 2
        });
        assert_eq!(Some(2), pipe.find(|item, _| *item == 2));
        assert_eq!(1, observed.get());
    }

    #[test]
    fn test_map_index() {
        let mapped = Pipe::new(vec!["a", "b", "c"]).map(|item, index| format!("{index}{item}")).sink_vec();
        assert_eq!(vec!["0a", "1b", "2c"], mapped);
    }

    #[test]
    fn test_filter_index_counts_source() {
        let seen = Rc::new(RefCell::new(vec![]));
        let recorder = seen.clone();
        let kept = Pipe::new(vec![10, 20, 30, 40])
            .filter(move |item, index| {
                recorder.borrow_mut().push(index);
                item % 20 == 0
            })
            .map(|item, index| (item, index))
            .sink_vec();
        assert_eq!(vec![0, 1, 2, 3], *seen.borrow());
        // 下游的索引按照过滤后的位置重新计数
        assert_eq!(vec![(20, 0), (40, 1)], kept);

        let even_positions = Pipe::new(vec![10, 20, 30, 40]).filter(|_, index| index % 2 == 0).sink_vec();
        assert_eq!(vec![10, 30], even_positions);
    }

    #[test]
    fn test_filter_truthy_items() {
        let kept = Pipe::new(vec![Item::from(0), Item::from("x"), Item::Null, Item::from(2)])
            .filter(|item, _| item.is_truthy())
            .sink_vec();
        assert_eq!(vec![Item::from("x"), Item::from(2)], kept);
    }

    #[test]
    fn test_flat() {
        let source = list![1, list![2, list![3, list![4]]]];
        let flat = |depth| Pipe::try_from(source.clone()).unwrap().flat(depth).sink_vec();
        assert_eq!(vec![Item::from(1), list![2, list![3, list![4]]]], flat(0));
        assert_eq!(vec![Item::from(1), Item::from(2), list![3, list![4]]], flat(1));
        assert_eq!(vec![Item::from(1), Item::from(2), Item::from(3), list![4]], flat(2));
        assert_eq!(flat(1), Pipe::try_from(source.clone()).unwrap().flat_once().sink_vec());
    }

    #[test]
    fn test_flat_map() {
        let pairs = Pipe::new(vec![1, 2]).flat_map(|item, index| list![item, list![index]], 1).sink_vec();
        assert_eq!(vec![Item::from(1), list![0], Item::from(2), list![1]], pairs);

        let deep = Pipe::new(vec![1, 2]).flat_map(|item, index| list![item, list![index]], 2).sink_vec();
        assert_eq!(vec![Item::from(1), Item::from(0), Item::from(2), Item::from(1)], deep);

        let none = Pipe::new(vec![1]).flat_map(|item, _| list![item], 0).sink_vec();
        assert_eq!(vec![list![1]], none);
    }

    #[test]
    fn test_flatten_typed() {
        let flat = Pipe::new(vec![vec![1, 2], vec![], vec![3]]).flatten().sink_vec();
        assert_eq!(vec![1, 2, 3], flat);
        let chars = Pipe::new(vec!["ab", "c"]).map(|s, _| s.chars()).flatten().sink_vec();
        assert_eq!(vec!['a', 'b', 'c'], chars);
    }

    #[test]
    fn test_take_and_skip() {
        let (calls, observed) = counter();
        let taken = Pipe::new(1..)
            .inspect(move |_, _| calls.set(calls.get() + 1))
            .skip(2)
            .take(3)
            .sink_vec();
        assert_eq!(vec![3, 4, 5], taken);
        assert_eq!(5, observed.get());
        assert!(Pipe::new(vec![1, 2]).take(0).sink_vec().is_empty());
    }

    #[test]
    fn test_inspect_index() {
        let seen = Rc::new(RefCell::new(vec![]));
        let recorder = seen.clone();
        let items = Pipe::new(vec!['x', 'y'])
            .inspect(move |item, index| recorder.borrow_mut().push((*item, index)))
            .peek()
            .sink_vec();
        assert_eq!(vec!['x', 'y'], items);
        assert_eq!(vec![('x', 0), ('y', 1)], *seen.borrow());
    }

    #[test]
    fn test_try_map() {
        let mut pipe = Pipe::new(vec!["1", "x", "3"]).try_map(|s, _| s.parse::<i32>());
        assert_eq!(Some(Ok(1)), pipe.iter().next().map(|r| r.map_err(|_| ())));
        assert!(pipe.iter().next().unwrap().is_err());
    }

    #[test]
    fn test_panicking_callback_not_called_on_construction() {
        let _pipe = Pipe::new(vec![1, 2]).map(|_, _| -> i32 { panic!("boom") });
    }

    #[test]
    #[should_panic(expected = "boom at 1")]
    fn test_panicking_callback_propagates_on_pull() {
        let mut pipe =
            Pipe::new(vec![1, 2, 3]).map(|item, index| if index == 1 { panic!("boom at {index}") } else { item });
        assert_eq!(Some(1), pipe.iter().next());
        pipe.iter().next();
    }
}
