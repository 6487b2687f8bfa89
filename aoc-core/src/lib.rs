//! Solver framework for Advent of Code puzzles.
//!
//! Every day is its own type implementing [`AocParser`] (how to read the
//! puzzle text) and one [`PartSolver<N>`] per part. `#[derive(AocSolver)]`
//! ties the parts together into a [`Solver`], and `#[derive(AutoRegisterSolver)]`
//! submits the day to the plugin collection so a runner can find it with
//! [`SolverRegistryBuilder::register_all_plugins`].
//!
//! ```
//! use aoc_core::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input.lines().map(|l| l.parse().map_err(ParseError::invalid)).collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Depths>(2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "199\n200\n208\n210\n200").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "3");
//! assert_eq!(solver.solve(2).unwrap().answer, "1");
//! ```
//!
//! Parts solved on the same instance share `SharedData`, so part 2 can pick
//! up whatever part 1 left there. Each part must still be solvable on a
//! fresh instance, since runners may solve parts in parallel.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code `AutoRegisterSolver` expands to
pub use inventory;

pub use aoc_core_macros::{AocSolver, AutoRegisterSolver};
