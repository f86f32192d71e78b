/// 可以展开为同类型子元素的元素。
///
/// 展开时取得元素的所有权：可展开则返回子元素的迭代器，否则原样返回元素。
pub trait Nested: Sized {
    fn expand(self) -> Result<Box<dyn Iterator<Item = Self>>, Self>;
}

/// 按深度惰性展开嵌套元素的迭代器。
///
/// 栈中每一层记录一个迭代器及其剩余可展开的深度，只有在被拉取时才会展开下一层。
pub(crate) struct FlatIter<'a, T> {
    stack: Vec<(Box<dyn Iterator<Item = T> + 'a>, usize)>,
}

impl<'a, T: Nested + 'a> FlatIter<'a, T> {
    pub(crate) fn new(source: Box<dyn Iterator<Item = T> + 'a>, depth: usize) -> Self {
        FlatIter { stack: vec![(source, depth)] }
    }
}

impl<'a, T: Nested + 'a> Iterator for FlatIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (iter, depth) = self.stack.last_mut()?;
            match iter.next() {
                None => {
                    self.stack.pop();
                }
                Some(item) if *depth == 0 => return Some(item),
                Some(item) => {
                    let depth = *depth - 1;
                    match item.expand() {
                        Ok(children) => self.stack.push((children, depth)),
                        Err(item) => return Some(item),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::list;

    fn flat(source: Item, depth: usize) -> Vec<Item> {
        FlatIter::new(source.into_items().unwrap(), depth).collect()
    }

    #[test]
    fn test_flat_depth() {
        let source = list![1, list![2, list![3, list![4]]]];
        assert_eq!(vec![Item::from(1), list![2, list![3, list![4]]]], flat(source.clone(), 0));
        assert_eq!(vec![Item::from(1), Item::from(2), list![3, list![4]]], flat(source.clone(), 1));
        assert_eq!(vec![Item::from(1), Item::from(2), Item::from(3), list![4]], flat(source.clone(), 2));
        assert_eq!(vec![Item::from(1), Item::from(2), Item::from(3), Item::from(4)], flat(source.clone(), 3));
        assert_eq!(flat(source.clone(), 3), flat(source, usize::MAX));
    }

    #[test]
    fn test_flat_empty_and_scalar() {
        assert_eq!(Vec::<Item>::new(), flat(list![], 1));
        assert_eq!(Vec::<Item>::new(), flat(list![list![], list![list![]]], 2));
        assert_eq!(vec![list![]], flat(list![list![list![]]], 1));
        assert_eq!(vec![Item::Null, Item::from(true)], flat(list![Item::Null, true], 5));
    }

    #[test]
    fn test_flat_string() {
        assert_eq!(vec![Item::from("ab")], flat(list!["ab"], 0));
        assert_eq!(vec![Item::from("a"), Item::from("b"), Item::from(1)], flat(list!["ab", 1], 1));
        // 单字符的字符串展开后仍为自身，深度耗尽后停止
        assert_eq!(vec![Item::from("a"), Item::from("b")], flat(list!["ab"], 10));
        let deep = list!["ab", list![list!["c", list!["de"]]]];
        let chars = vec![Item::from("a"), Item::from("b"), Item::from("c"), Item::from("d"), Item::from("e")];
        assert_eq!(chars, flat(deep, usize::MAX));
    }
}
