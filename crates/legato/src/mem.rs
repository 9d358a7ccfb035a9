use std::collections::HashMap;
use std::rc::Rc;

use word_ops::{BitOps, WordOps};

/// A key-value store over symbolic addresses and values.
///
/// A read must return the value of the most recent write to an equal address, or the reset value
/// if no such write exists. Stores are persistent: writes and merges produce new stores and leave
/// their inputs untouched.
pub trait MemoryStore<V: WordOps>: Sized {
    /// A store that answers every address with `default`.
    fn reset(default: V) -> Self;

    /// Read the value stored at `address`.
    fn read(&self, address: &V) -> V;

    /// A new store whose only observable difference is `value` stored at `address`.
    fn write(&self, address: V, value: V) -> Self;

    /// A store that reads as `lhs` where `condition` holds and as `rhs` otherwise.
    fn merge(condition: &V::Bit, lhs: &Self, rhs: &Self) -> Self;
}

/// Memory realized as a total function: a constant default overridden by a list of cells. Reads
/// resolve eagerly into a chain of conditional selections over address equality.
#[derive(Debug, Clone)]
pub struct DenseMemory<V> {
    default: V,

    /// Overridden cells ordered from oldest to newest write. No two addresses are identical.
    cells: Vec<(V, V)>,
}

impl<V: WordOps> DenseMemory<V> {
    /// Addresses that have been written. Symbolic addresses may alias one another.
    pub fn touched(&self) -> impl Iterator<Item = &V> {
        self.cells.iter().map(|(address, _)| address)
    }
}

impl<V: WordOps> MemoryStore<V> for DenseMemory<V> {
    fn reset(default: V) -> Self {
        Self {
            default,
            cells: Vec::new(),
        }
    }

    fn read(&self, address: &V) -> V {
        // An identical address is known to be equal, so every older cell is shadowed by it
        let (mut value, newer) = match self
            .cells
            .iter()
            .rposition(|(key, _)| key.is_identical(address))
        {
            Some(i) => (self.cells[i].1.clone(), &self.cells[i + 1..]),
            None => (self.default.clone(), &self.cells[..]),
        };

        for (key, cell) in newer {
            let hit = address.clone().equals(key.clone());
            value = V::select(hit, cell.clone(), value);
        }

        value
    }

    fn write(&self, address: V, value: V) -> Self {
        let mut cells = self
            .cells
            .iter()
            .filter(|(key, _)| !key.is_identical(&address))
            .cloned()
            .collect::<Vec<_>>();
        cells.push((address, value));

        Self {
            default: self.default.clone(),
            cells,
        }
    }

    fn merge(condition: &V::Bit, lhs: &Self, rhs: &Self) -> Self {
        let mut addresses = lhs.touched().collect::<Vec<_>>();
        for address in rhs.touched() {
            if !addresses.iter().any(|known| known.is_identical(address)) {
                addresses.push(address);
            }
        }

        // Every cell holds the merged read of its address, so the relative order of the cells
        // does not matter even when addresses alias
        let cells = addresses
            .into_iter()
            .map(|address| {
                let value = V::select(condition.clone(), lhs.read(address), rhs.read(address));
                (address.clone(), value)
            })
            .collect();

        Self {
            default: V::select(condition.clone(), lhs.default.clone(), rhs.default.clone()),
            cells,
        }
    }
}

#[derive(Debug)]
enum ArrayTerm<V: WordOps> {
    Constant(V),
    Store {
        array: Rc<ArrayTerm<V>>,
        index: V,
        value: V,
    },
    Ite {
        condition: V::Bit,
        then: Rc<ArrayTerm<V>>,
        otherwise: Rc<ArrayTerm<V>>,
    },
}

/// Memory realized as an array term with store and select semantics. Writes and merges are
/// recorded as terms. Reads apply the read-over-write and if-then-else lifting rules of the
/// theory of arrays.
#[derive(Debug, Clone)]
pub struct ArrayMemory<V: WordOps> {
    array: Rc<ArrayTerm<V>>,
}

impl<V: WordOps> ArrayMemory<V> {
    fn select(
        term: &Rc<ArrayTerm<V>>,
        address: &V,
        cache: &mut HashMap<*const ArrayTerm<V>, V>,
    ) -> V {
        let key = Rc::as_ptr(term);
        if let Some(value) = cache.get(&key) {
            return value.clone();
        }

        let value = match term.as_ref() {
            ArrayTerm::Constant(default) => default.clone(),
            ArrayTerm::Store {
                array,
                index,
                value,
            } => {
                if index.is_identical(address) {
                    value.clone()
                } else {
                    let older = Self::select(array, address, cache);
                    V::select(address.clone().equals(index.clone()), value.clone(), older)
                }
            }
            ArrayTerm::Ite {
                condition,
                then,
                otherwise,
            } => {
                let then = Self::select(then, address, cache);
                let otherwise = Self::select(otherwise, address, cache);
                V::select(condition.clone(), then, otherwise)
            }
        };

        cache.insert(key, value.clone());
        value
    }
}

impl<V: WordOps> MemoryStore<V> for ArrayMemory<V> {
    fn reset(default: V) -> Self {
        Self {
            array: Rc::new(ArrayTerm::Constant(default)),
        }
    }

    fn read(&self, address: &V) -> V {
        // The cache is keyed on terms reachable from self, which outlive this call
        let mut cache = HashMap::new();
        Self::select(&self.array, address, &mut cache)
    }

    fn write(&self, address: V, value: V) -> Self {
        Self {
            array: Rc::new(ArrayTerm::Store {
                array: Rc::clone(&self.array),
                index: address,
                value,
            }),
        }
    }

    fn merge(condition: &V::Bit, lhs: &Self, rhs: &Self) -> Self {
        if Rc::ptr_eq(&lhs.array, &rhs.array) {
            return lhs.clone();
        }

        match condition.known() {
            Some(true) => lhs.clone(),
            Some(false) => rhs.clone(),
            None => Self {
                array: Rc::new(ArrayTerm::Ite {
                    condition: condition.clone(),
                    then: Rc::clone(&lhs.array),
                    otherwise: Rc::clone(&rhs.array),
                }),
            },
        }
    }
}

/// Backing strategy of the [Memory] model. Both strategies produce identical answers and differ
/// only in the shape of the terms handed to a solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MemoryStrategy {
    /// See [DenseMemory].
    #[default]
    Dense,

    /// See [ArrayMemory].
    Array,
}

impl std::fmt::Display for MemoryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dense => write!(f, "dense"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// Machine memory using the backing strategy chosen at [reset](Memory::reset).
#[derive(Debug, Clone)]
pub enum Memory<V: WordOps> {
    Dense(DenseMemory<V>),
    Array(ArrayMemory<V>),
}

impl<V: WordOps> Memory<V> {
    /// A memory that answers every address with `default`.
    pub fn reset(strategy: MemoryStrategy, default: V) -> Self {
        match strategy {
            MemoryStrategy::Dense => Self::Dense(DenseMemory::reset(default)),
            MemoryStrategy::Array => Self::Array(ArrayMemory::reset(default)),
        }
    }

    pub fn strategy(&self) -> MemoryStrategy {
        match self {
            Self::Dense(_) => MemoryStrategy::Dense,
            Self::Array(_) => MemoryStrategy::Array,
        }
    }

    pub fn read(&self, address: &V) -> V {
        match self {
            Self::Dense(memory) => memory.read(address),
            Self::Array(memory) => memory.read(address),
        }
    }

    pub fn write(&self, address: V, value: V) -> Self {
        match self {
            Self::Dense(memory) => Self::Dense(memory.write(address, value)),
            Self::Array(memory) => Self::Array(memory.write(address, value)),
        }
    }

    /// Merge two memories pointwise on `condition`.
    ///
    /// # Panics
    ///
    /// Both memories must use the same backing strategy.
    pub fn merge(condition: &V::Bit, lhs: &Self, rhs: &Self) -> Self {
        match (lhs, rhs) {
            (Self::Dense(lhs), Self::Dense(rhs)) => {
                Self::Dense(DenseMemory::merge(condition, lhs, rhs))
            }
            (Self::Array(lhs), Self::Array(rhs)) => {
                Self::Array(ArrayMemory::merge(condition, lhs, rhs))
            }
            _ => panic!(
                "cannot merge {lhs} memory with {rhs} memory",
                lhs = lhs.strategy(),
                rhs = rhs.strategy()
            ),
        }
    }
}
