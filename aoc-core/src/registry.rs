//! Registry of solver factories keyed by year and day

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Number of years the storage has room for (2015-2034)
pub const MAX_YEARS: usize = 20;
pub const DAYS_PER_YEAR: usize = 25;
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Flat slot for a year/day, or `None` when out of range
#[inline]
fn slot(year: u16, day: u8) -> Option<usize> {
    if !(BASE_YEAR..BASE_YEAR + MAX_YEARS as u16).contains(&year) {
        return None;
    }
    if !(1..=DAYS_PER_YEAR as u8).contains(&day) {
        return None;
    }
    Some((year - BASE_YEAR) as usize * DAYS_PER_YEAR + (day - 1) as usize)
}

#[inline]
fn year_day(slot: usize) -> (u16, u8) {
    (
        BASE_YEAR + (slot / DAYS_PER_YEAR) as u16,
        (slot % DAYS_PER_YEAR) as u8 + 1,
    )
}

/// Parses input into a ready-to-solve instance. Shared across threads.
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about a registered day without running it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    pub parts: u8,
}

struct FactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Read-only view over registered factories.
pub struct SolverFactoryStorage {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverFactoryStorage {
    /// Registered days in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = year_day(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        slot(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

/// Builder for a [`SolverRegistry`].
///
/// ```
/// use aoc_core::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder, register_solver};
///
/// struct Sum;
///
/// impl AocParser for Sum {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input.split_whitespace().map(|n| n.parse().map_err(ParseError::invalid)).collect()
///     }
/// }
///
/// impl Solver for Sum {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<u32>().to_string())
///     }
/// }
///
/// let mut builder = SolverRegistryBuilder::new();
/// register_solver!(builder, Sum, 2020, 1);
/// let registry = builder.build();
///
/// let mut solver = registry.create_solver(2020, 1, "1 2 3").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "6");
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<FactoryEntry>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory for `year`/`day` producing solvers with `parts` parts.
    ///
    /// Fails when the slot is out of range or already taken.
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = slot(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        self.entries[index] = Some(FactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register `S` for `year`/`day`.
    pub fn register<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register every plugin submitted with `inventory::submit!`.
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins for which `filter` returns `true`.
    ///
    /// ```no_run
    /// # use aoc_core::SolverRegistryBuilder;
    /// let only_2020 = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2020)
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage {
                entries: self.entries,
            },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable lookup from year/day to solver factory
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for `year`/`day`.
    ///
    /// # Errors
    /// * `InvalidYearDay` - the pair can never be registered
    /// * `NotFound` - nothing registered for the pair
    /// * `ParseError` - the solver rejected the input
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = slot(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;
        let entry = self.storage.entries[index]
            .as_ref()
            .ok_or(SolverError::NotFound(year, day))?;
        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

/// Type-erased registration hook, so plugins of different solver types can
/// live in one `inventory` collection.
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A self-registered solver, usually produced by `#[derive(AutoRegisterSolver)]`.
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used by `--tags` filtering
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register `$solver` on a mutable builder binding, panicking on duplicates.
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = $builder
            .register::<$solver>($year, $day)
            .expect("Failed to register solver");
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AocParser, SolveError};
    use proptest::prelude::*;

    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                Err(ParseError::missing("empty"))
            } else {
                Ok(input)
            }
        }
    }

    impl Solver for Echo {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            Ok(format!("{part}:{shared}"))
        }
    }

    proptest! {
        #[test]
        fn slot_round_trips(year in 2015u16..2035, day in 1u8..=25) {
            let index = slot(year, day).unwrap();
            prop_assert!(index < CAPACITY);
            prop_assert_eq!(year_day(index), (year, day));
        }

        #[test]
        fn slot_rejects_out_of_range(year in 0u16..2015, day in 26u8..=255) {
            prop_assert!(slot(year, 1).is_none());
            prop_assert!(slot(2020, day).is_none());
            prop_assert!(slot(2020, 0).is_none());
            prop_assert!(slot(2035, 1).is_none());
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let result = SolverRegistryBuilder::new()
            .register::<Echo>(2020, 1)
            .unwrap()
            .register::<Echo>(2020, 1);
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicateSolver(2020, 1))
        ));
    }

    #[test]
    fn out_of_range_registration_is_rejected() {
        let result = SolverRegistryBuilder::new().register::<Echo>(2020, 26);
        assert!(matches!(
            result,
            Err(RegistrationError::InvalidYearDay(2020, 26))
        ));
    }

    #[test]
    fn storage_lists_registered_days_in_order() {
        let registry = SolverRegistryBuilder::new()
            .register::<Echo>(2023, 5)
            .unwrap()
            .register::<Echo>(2020, 7)
            .unwrap()
            .build();

        let infos: Vec<_> = registry.storage().iter_info().collect();
        assert_eq!(
            infos,
            vec![
                FactoryInfo { year: 2020, day: 7, parts: 2 },
                FactoryInfo { year: 2023, day: 5, parts: 2 },
            ]
        );
        assert_eq!(registry.storage().len(), 2);
        assert!(registry.storage().contains(2023, 5));
        assert!(!registry.storage().contains(2023, 6));
    }

    #[test]
    fn create_solver_reports_missing_and_parse_errors() {
        let registry = SolverRegistryBuilder::new()
            .register::<Echo>(2020, 1)
            .unwrap()
            .build();

        assert!(matches!(
            registry.create_solver(2020, 2, "x"),
            Err(SolverError::NotFound(2020, 2))
        ));
        assert!(matches!(
            registry.create_solver(1999, 2, "x"),
            Err(SolverError::InvalidYearDay(1999, 2))
        ));
        assert!(matches!(
            registry.create_solver(2020, 1, ""),
            Err(SolverError::ParseError(ParseError::MissingData(_)))
        ));

        let mut solver = registry.create_solver(2020, 1, "hi").unwrap();
        assert_eq!(solver.solve(2).unwrap().answer, "2:hi");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
    }
}
