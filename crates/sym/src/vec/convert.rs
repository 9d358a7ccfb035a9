use super::SymbolicBitVec;
use crate::bit::SymbolicBit;

impl IntoIterator for SymbolicBitVec {
    type Item = SymbolicBit;
    type IntoIter = std::collections::vec_deque::IntoIter<SymbolicBit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl<'a> IntoIterator for &'a SymbolicBitVec {
    type Item = &'a SymbolicBit;
    type IntoIter = std::collections::vec_deque::Iter<'a, SymbolicBit>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl FromIterator<SymbolicBit> for SymbolicBitVec {
    fn from_iter<T: IntoIterator<Item = SymbolicBit>>(iter: T) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
