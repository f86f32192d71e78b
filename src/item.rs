use crate::op::flat::Nested;
use crate::sink::IntoEntry;
use crate::terminal::Defined;
use crate::{Float, Integer};
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rustc_hash::FxBuildHasher;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// 保持插入顺序的集合。
pub type ItemSet = IndexSet<Item, FxBuildHasher>;
/// 保持插入顺序的映射，键可以为任意元素。
pub type ItemMap = IndexMap<Item, Item, FxBuildHasher>;
/// 保持插入顺序、以字符串为键的记录。
pub type Record = IndexMap<String, Item, FxBuildHasher>;

/// 动态类型的元素。
///
/// 当源是否可迭代只能在运行时判断时使用，例如嵌套列表的展开、从任意值构造流水线。
/// 可迭代的变体为：`String`（逐字符）、`List`、`Set`、`Map`（逐个`[key, value]`）。
///
/// 相等性按值比较：`Integer`与整数值的`Float`按数值比较（`1 == 1.0`、`0 == -0.0`），
/// `NaN`与`NaN`相等，容器逐个比较其中的元素，`Set`、`Map`和`Record`的比较与顺序无关。
#[derive(Debug, Clone, Default)]
pub enum Item {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Integer(Integer),
    Float(OrderedFloat<Float>),
    String(String),
    List(Vec<Item>),
    Set(ItemSet),
    Map(ItemMap),
    Record(Record),
}

impl Item {
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Undefined => "undefined",
            Item::Null => "null",
            Item::Bool(_) => "boolean",
            Item::Integer(_) => "integer",
            Item::Float(_) => "float",
            Item::String(_) => "string",
            Item::List(_) => "list",
            Item::Set(_) => "set",
            Item::Map(_) => "map",
            Item::Record(_) => "record",
        }
    }

    pub fn is_iterable(&self) -> bool {
        matches!(self, Item::String(_) | Item::List(_) | Item::Set(_) | Item::Map(_))
    }

    /// 按照宽松的真值规则判断：`undefined`、`null`、`false`、`0`、`0.0`、`NaN`和空字符串为假，其他为真。
    pub fn is_truthy(&self) -> bool {
        match self {
            Item::Undefined | Item::Null => false,
            Item::Bool(b) => *b,
            Item::Integer(i) => *i != 0,
            Item::Float(f) => !(f.0.is_nan() || f.0 == 0.0),
            Item::String(s) => !s.is_empty(),
            Item::List(_) | Item::Set(_) | Item::Map(_) | Item::Record(_) => true,
        }
    }

    /// 获取记录的字段，非记录或字段不存在时返回`None`。
    pub fn get(&self, key: &str) -> Option<&Item> {
        match self {
            Item::Record(record) => record.get(key),
            _ => None,
        }
    }

    /// 获取列表指定位置的元素，非列表或越界时返回`None`。
    pub fn at(&self, index: usize) -> Option<&Item> {
        match self {
            Item::List(list) => list.get(index),
            _ => None,
        }
    }

    /// 借用地逐个产出子元素（克隆），不可迭代时返回`None`。
    pub(crate) fn iter_items(&self) -> Option<Box<dyn Iterator<Item = Item> + '_>> {
        match self {
            Item::String(s) => Some(Box::new(s.chars().map(|c| Item::String(c.to_string())))),
            Item::List(list) => Some(Box::new(list.iter().cloned())),
            Item::Set(set) => Some(Box::new(set.iter().cloned())),
            Item::Map(map) => Some(Box::new(map.iter().map(|(k, v)| Item::List(vec![k.clone(), v.clone()])))),
            _ => None,
        }
    }

    /// 取得所有权地逐个产出子元素，不可迭代时原样返回。
    pub(crate) fn into_items(self) -> Result<Box<dyn Iterator<Item = Item>>, Item> {
        match self {
            Item::String(s) => Ok(Box::new(OwnedChars::new(s))),
            Item::List(list) => Ok(Box::new(list.into_iter())),
            Item::Set(set) => Ok(Box::new(set.into_iter())),
            Item::Map(map) => Ok(Box::new(map.into_iter().map(|(k, v)| Item::List(vec![k, v])))),
            other => Err(other),
        }
    }
}

/// 浮点数为整数值且在`Integer`范围内时返回对应的整数。
fn integral(float: Float) -> Option<Integer> {
    // 2^63，`Integer`范围的上界（不含）
    const BOUND: Float = 9_223_372_036_854_775_808.0;
    (float.fract() == 0.0 && (-BOUND..BOUND).contains(&float)).then_some(float as Integer)
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Undefined, Item::Undefined) | (Item::Null, Item::Null) => true,
            (Item::Bool(l), Item::Bool(r)) => l == r,
            (Item::Integer(l), Item::Integer(r)) => l == r,
            (Item::Float(l), Item::Float(r)) => l == r,
            (Item::Integer(i), Item::Float(f)) | (Item::Float(f), Item::Integer(i)) => integral(f.0) == Some(*i),
            (Item::String(l), Item::String(r)) => l == r,
            (Item::List(l), Item::List(r)) => l == r,
            (Item::Set(l), Item::Set(r)) => l == r,
            (Item::Map(l), Item::Map(r)) => l == r,
            (Item::Record(l), Item::Record(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 整数与整数值的浮点数相等，二者共用同一个判别值
        let number = match self {
            Item::Integer(i) => Some(*i),
            Item::Float(f) => integral(f.0),
            _ => None,
        };
        if let Some(i) = number {
            std::mem::discriminant(&Item::Integer(0)).hash(state);
            return i.hash(state);
        }
        std::mem::discriminant(self).hash(state);
        match self {
            Item::Undefined | Item::Null => {}
            Item::Bool(b) => b.hash(state),
            Item::Integer(i) => i.hash(state),
            Item::Float(f) => f.hash(state),
            Item::String(s) => s.hash(state),
            Item::List(list) => list.hash(state),
            // 集合与映射的相等性与顺序无关，只能对长度求哈希。
            Item::Set(set) => set.len().hash(state),
            Item::Map(map) => map.len().hash(state),
            Item::Record(record) => record.len().hash(state),
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Undefined => write!(f, "undefined"),
            Item::Null => write!(f, "null"),
            Item::Bool(b) => write!(f, "{b}"),
            Item::Integer(i) => write!(f, "{i}"),
            Item::Float(float) => {
                let float = float.0;
                if float.is_nan() {
                    write!(f, "NaN")
                } else if float.is_infinite() {
                    write!(f, "{}Infinity", if float < 0.0 { "-" } else { "" })
                } else if float.fract() == 0.0 && float.abs() < 1e15 {
                    // 整数值的浮点数不显示小数部分
                    write!(f, "{}", float as Integer)
                } else {
                    write!(f, "{float}")
                }
            }
            Item::String(s) => write!(f, "{s}"),
            Item::List(list) => write!(
                f,
                "{}",
                list.iter()
                    .map(|item| match item {
                        Item::Undefined | Item::Null => String::new(),
                        other => other.to_string(),
                    })
                    .join(",")
            ),
            Item::Set(_) => write!(f, "[object Set]"),
            Item::Map(_) => write!(f, "[object Map]"),
            Item::Record(_) => write!(f, "[object Object]"),
        }
    }
}

impl Nested for Item {
    /// 单个字符的字符串展开后仍是自身，视为不可展开。
    fn expand(self) -> Result<Box<dyn Iterator<Item = Self>>, Self> {
        match self {
            Item::String(s) if s.chars().count() == 1 => Err(Item::String(s)),
            other => other.into_items(),
        }
    }
}

impl Defined for Item {
    fn is_defined(&self) -> bool {
        !matches!(self, Item::Undefined)
    }
}

impl IntoEntry<Item, Item> for Item {
    /// 列表的前两个元素作为键和值，不足时以`Undefined`补齐；其他元素不构成键值对。
    fn into_entry(self) -> Option<(Item, Item)> {
        match self {
            Item::List(list) => {
                let mut iter = list.into_iter();
                let key = iter.next().unwrap_or_default();
                let value = iter.next().unwrap_or_default();
                Some((key, value))
            }
            _ => None,
        }
    }
}

impl From<bool> for Item {
    fn from(value: bool) -> Self {
        Item::Bool(value)
    }
}

impl From<i32> for Item {
    fn from(value: i32) -> Self {
        Item::Integer(value as Integer)
    }
}

impl From<Integer> for Item {
    fn from(value: Integer) -> Self {
        Item::Integer(value)
    }
}

impl From<usize> for Item {
    /// 超出`Integer`范围时转换为`Float`。
    fn from(value: usize) -> Self {
        Integer::try_from(value).map_or_else(|_| Item::Float(OrderedFloat(value as Float)), Item::Integer)
    }
}

impl From<Float> for Item {
    fn from(value: Float) -> Self {
        Item::Float(OrderedFloat(value))
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Item::String(value.to_owned())
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Item::String(value)
    }
}

impl<T: Into<Item>> From<Vec<T>> for Item {
    fn from(value: Vec<T>) -> Self {
        Item::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<ItemSet> for Item {
    fn from(value: ItemSet) -> Self {
        Item::Set(value)
    }
}

impl From<ItemMap> for Item {
    fn from(value: ItemMap) -> Self {
        Item::Map(value)
    }
}

impl From<Record> for Item {
    fn from(value: Record) -> Self {
        Item::Record(value)
    }
}

/// 构造`Item::List`，每个元素通过`Item::from`转换。
///
/// ```
/// use lazy_pipe::{Item, list};
///
/// let nested = list![1, list![2, "three"]];
/// assert_eq!(Some(&Item::from(1)), nested.at(0));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Item::List(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Item::List(::std::vec![$($crate::Item::from($item)),+])
    };
}

/// 构造`Item::Record`，字段按书写顺序插入。
///
/// ```
/// use lazy_pipe::{Item, record};
///
/// let user = record! { "id" => 1, "name" => "alice" };
/// assert_eq!(Some(&Item::from("alice")), user.get("name"));
/// ```
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut record = $crate::Record::default();
        $(record.insert(::std::string::String::from($key), $crate::Item::from($value));)*
        $crate::Item::Record(record)
    }};
}

/// 逐字符产出的字符串迭代器，持有字符串的所有权。
#[derive(Debug)]
struct OwnedChars {
    text: String,
    pos: usize,
}

impl OwnedChars {
    fn new(text: String) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for OwnedChars {
    type Item = Item;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(Item::String(c.to_string()))
    }
}
