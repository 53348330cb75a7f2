use core::fmt;

/// Aggregation interface that drives a [SegmentTree](crate::SegmentTree)
///
/// An operation is a binary function that must be [associative][1] together with an
/// [identity element][2]:
///
/// - `combine(combine(a, b), c) == combine(a, combine(b, c))`
/// - `combine(identity(), a) == combine(a, identity()) == a`
///
/// The operation does not have to be commutative. Queries combine sub-ranges strictly
/// in left-to-right order.
///
/// Neither property can be checked at runtime. Violating them silently produces wrong
/// query results.
///
/// # Example
///
/// Here is a simple example showing how to create a operation that keeps the largest
/// absolute value.
/// ```
/// use flatseg_core::{Operation, SegmentTree};
///
/// #[derive(Default, Debug, Clone, Copy)]
/// struct MaxAbs;
///
/// impl Operation<i64> for MaxAbs {
///     fn identity(&self) -> i64 {
///         0
///     }
///     fn combine(&self, a: &i64, b: &i64) -> i64 {
///         if a.unsigned_abs() >= b.unsigned_abs() { *a } else { *b }
///     }
/// }
///
/// let tree = SegmentTree::build(vec![3, -9, 4, 1], MaxAbs).unwrap();
/// assert_eq!(tree.query(0, 4), Ok(-9));
/// assert_eq!(tree.query(2, 4), Ok(4));
/// ```
///
/// [1]: https://en.wikipedia.org/wiki/Associative_property
/// [2]: https://en.wikipedia.org/wiki/Identity_element
pub trait Operation<T> {
    /// Returns the identity element of this operation
    ///
    /// For example, for SUM types the identity value should be set to 0.
    fn identity(&self) -> T;

    /// Combines two values where `a` is the left operand and `b` the right operand
    fn combine(&self, a: &T, b: &T) -> T;

    /// Replaces `a` with `combine(a, b)`
    ///
    /// A default implementation is provided that simply calls `combine`.
    #[inline]
    fn combine_mut(&self, a: &mut T, b: &T) {
        let res = self.combine(&*a, b);
        *a = res;
    }
}

/// An [Operation] built from an identity value and a closure
///
/// ```
/// use flatseg_core::{FnOperation, SegmentTree};
///
/// let concat = FnOperation::new(String::new(), |a: &String, b: &String| format!("{a}{b}"));
/// let words = vec!["seg".to_string(), "ment".into(), " ".into(), "tree".into()];
/// let tree = SegmentTree::build(words, concat).unwrap();
/// assert_eq!(tree.query(0, 2).unwrap(), "segment");
/// ```
#[derive(Clone, Copy)]
pub struct FnOperation<T, F> {
    identity: T,
    combine: F,
}

impl<T, F> FnOperation<T, F>
where
    F: Fn(&T, &T) -> T,
{
    /// Creates a new operation from the given identity and combine function
    pub fn new(identity: T, combine: F) -> Self {
        Self { identity, combine }
    }
}

impl<T, F> Operation<T> for FnOperation<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    #[inline]
    fn identity(&self) -> T {
        self.identity.clone()
    }
    #[inline]
    fn combine(&self, a: &T, b: &T) -> T {
        (self.combine)(a, b)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for FnOperation<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOperation")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Each node contains the sum of the interval it represents.
///
/// Integer sums wrap on overflow.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct Sum;
/// Each node contains the product of the interval it represents.
///
/// Integer products wrap on overflow.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct Product;
/// Each node contains the minimum of the interval it represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct Min;
/// Each node contains the maximum of the interval it represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct Max;
/// Each node contains the bitwise and of the interval it represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct BitAnd;
/// Each node contains the bitwise or of the interval it represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct BitOr;
/// Each node contains the bitwise xor of the interval it represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct BitXor;
/// Each node contains the greatest common divisor of the interval it represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Hash)]
pub struct Gcd;

macro_rules! impl_operation {
    ($op:ty, $type:ty, $identity:expr, |$a:ident, $b:ident| $combine:expr) => {
        impl Operation<$type> for $op {
            #[inline]
            fn identity(&self) -> $type {
                $identity
            }
            #[inline]
            fn combine(&self, $a: &$type, $b: &$type) -> $type {
                $combine
            }
        }
    };
}

macro_rules! int_impl {
    ($type:ty) => {
        impl_operation!(Sum, $type, 0, |a, b| a.wrapping_add(*b));
        impl_operation!(Product, $type, 1, |a, b| a.wrapping_mul(*b));
        impl_operation!(Min, $type, <$type>::MAX, |a, b| <$type>::min(*a, *b));
        impl_operation!(Max, $type, <$type>::MIN, |a, b| <$type>::max(*a, *b));
        impl_operation!(BitAnd, $type, !0, |a, b| *a & *b);
        impl_operation!(BitOr, $type, 0, |a, b| *a | *b);
        impl_operation!(BitXor, $type, 0, |a, b| *a ^ *b);
    };
}

macro_rules! unsigned_impl {
    ($type:ty) => {
        int_impl!($type);
        impl_operation!(Gcd, $type, 0, |a, b| {
            let (mut x, mut y) = (*a, *b);
            while y != 0 {
                let rem = x % y;
                x = y;
                y = rem;
            }
            x
        });
    };
}

macro_rules! float_impl {
    ($type:ty) => {
        impl_operation!(Sum, $type, 0.0, |a, b| *a + *b);
        impl_operation!(Product, $type, 1.0, |a, b| *a * *b);
        impl_operation!(Min, $type, <$type>::INFINITY, |a, b| a.min(*b));
        impl_operation!(Max, $type, <$type>::NEG_INFINITY, |a, b| a.max(*b));
    };
}

unsigned_impl!(u8);
unsigned_impl!(u16);
unsigned_impl!(u32);
unsigned_impl!(u64);
unsigned_impl!(u128);
unsigned_impl!(usize);
int_impl!(i8);
int_impl!(i16);
int_impl!(i32);
int_impl!(i64);
int_impl!(i128);
int_impl!(isize);
float_impl!(f32);
float_impl!(f64);
