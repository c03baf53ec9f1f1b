use core::ops;
use proptest::arbitrary::{any, Arbitrary};
use proptest::collection::vec;
use proptest::sample::{select, Index};
use proptest::strategy::{BoxedStrategy, Strategy};
use crate::Backend;

/// An arbitrary byte vector limited in size.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundVec<const C: usize> {
    inner: Vec<u8>
}

impl<const C: usize> BoundVec<C> {
    #[track_caller]
    #[inline]
    pub fn new_with(vec: Vec<u8>) -> Self {
        assert!(vec.len() <= C);
        Self { inner: vec }
    }
}

impl<const C: usize> ops::Deref for BoundVec<C> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.inner.as_slice()
    }
}

impl<const C: usize> Arbitrary for BoundVec<C> {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        vec(any::<u8>(), 0..=C)
            .prop_map(BoundVec::new_with)
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

/// An input of at most `C` bytes, and the offsets at which it is cut into separate writes.
#[derive(Debug, Clone)]
pub struct Split<const C: usize> {
    input: Vec<u8>,
    cuts: Vec<usize>
}

impl<const C: usize> Split<C> {
    #[inline]
    pub fn whole(&self) -> &[u8] {
        self.input.as_slice()
    }

    /// The pieces of the input, in order. Empty pieces are kept.
    pub fn chunks(&self) -> Vec<&[u8]> {
        let mut out = Vec::with_capacity(self.cuts.len() + 1);
        let mut start = 0;

        for &cut in &self.cuts {
            out.push(&self.input[start..cut]);
            start = cut;
        }

        out.push(&self.input[start..]);
        out
    }
}

impl<const C: usize> Arbitrary for Split<C> {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (vec(any::<u8>(), 0..=C), vec(any::<Index>(), 0..16))
            .prop_map(|(input, cuts)| {
                let mut cuts: Vec<usize> = cuts.iter()
                    .map(|cut| cut.index(input.len() + 1))
                    .collect();
                cuts.sort_unstable();

                Self { input, cuts }
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

/// Only generates backends the host can run.
impl Arbitrary for Backend {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        select(Backend::available().collect::<Vec<_>>()).boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
