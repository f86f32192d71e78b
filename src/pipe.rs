use crate::PipeRes;
use crate::config::{Config, is_verbose};
use crate::err::PipeErr;
use crate::item::Item;
use std::fmt::{Debug, Formatter};

/// 可链式操作的惰性流水线。
///
/// 流水线只持有源的迭代器，不会预先物化源中的数据：变换操作返回新的流水线，
/// 终结操作和汇聚操作从源当前未消费的位置开始拉取数据。
/// 对同一个流水线再次执行终结操作只能看到剩余的数据。
pub struct Pipe<'a, T> {
    pub(crate) iter: Box<dyn Iterator<Item = T> + 'a>,
    pub(crate) configs: &'a [Config],
}

impl<'a, T: 'a> Pipe<'a, T> {
    /// 从任意可迭代的值构造流水线，不会拉取任何数据。
    ///
    /// 传入`&vec`或`iter.by_ref()`时流水线只借用源，多个流水线可以共享同一个单次游标。
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Pipe { iter: Box::new(source.into_iter()), configs: &[] }
    }

    /// 从生成函数构造只能遍历一次的流水线，生成函数返回`None`表示结束。
    pub fn from_fn<F>(generator: F) -> Self
    where
        F: FnMut() -> Option<T> + 'a,
    {
        Pipe::new(std::iter::from_fn(generator))
    }

    pub fn with_configs(mut self, configs: &'a [Config]) -> Self {
        self.configs = configs;
        self
    }

    pub fn configs(&self) -> &'a [Config] {
        self.configs
    }

    /// 源的迭代能力，每次调用`next`都从源拉取下一个元素。
    pub fn iter(&mut self) -> &mut (dyn Iterator<Item = T> + 'a) {
        &mut *self.iter
    }

    pub(crate) fn trace(&self, message: impl FnOnce() -> String) {
        if is_verbose(self.configs) {
            println_trace!("[Pipe] {}", message());
        }
    }
}

/// 以新的阶段包装迭代器，继承上游流水线的配置。
pub(crate) fn staged<'a, U: 'a>(
    configs: &'a [Config],
    stage: &str,
    iter: impl Iterator<Item = U> + 'a,
) -> Pipe<'a, U> {
    if is_verbose(configs) {
        println_trace!("[Pipe] + {stage}");
    }
    Pipe { iter: Box::new(iter), configs }
}

impl<T> Debug for Pipe<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe").field("configs", &self.configs).finish_non_exhaustive()
    }
}

impl<'a, T: 'a> IntoIterator for Pipe<'a, T> {
    type Item = T;
    type IntoIter = Box<dyn Iterator<Item = T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter
    }
}

impl<'p, 'a, T: 'a> IntoIterator for &'p mut Pipe<'a, T> {
    type Item = T;
    type IntoIter = &'p mut (dyn Iterator<Item = T> + 'a);

    fn into_iter(self) -> Self::IntoIter {
        &mut *self.iter
    }
}

impl TryFrom<Item> for Pipe<'static, Item> {
    type Error = PipeErr;

    /// 仅当元素可迭代时构造成功，否则返回`InvalidArgument`。
    fn try_from(item: Item) -> PipeRes<Self> {
        let kind = item.kind();
        item.into_items().map(|iter| Pipe { iter, configs: &[] }).map_err(|_| PipeErr::InvalidArgument { kind })
    }
}

impl<'a> TryFrom<&'a Item> for Pipe<'a, Item> {
    type Error = PipeErr;

    /// 借用元素构造流水线，子元素在被拉取时才克隆。
    fn try_from(item: &'a Item) -> PipeRes<Self> {
        item.iter_items()
            .map(|iter| Pipe { iter, configs: &[] })
            .ok_or(PipeErr::InvalidArgument { kind: item.kind() })
    }
}
