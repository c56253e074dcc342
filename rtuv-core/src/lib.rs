//! Invocation of the TUV radiative-transfer model and decoding of its
//! photolysis rates.
//!
//! ```no_run
//! use rtuv_core::{InvocationParameters, TuvConfig, TuvOutcome, TuvRunner};
//!
//! let runner = TuvRunner::new(TuvConfig::with_root("/opt/tuv/V5.3.2"))?;
//! let parameters = InvocationParameters::new(60.0, 0.0, 298.0);
//! match runner.run(&parameters)? {
//!     TuvOutcome::Ready(rates) => println!("{:?}", rates.get_by_name("no2")),
//!     TuvOutcome::BuildTriggered => println!("TUV compiled, run again"),
//! }
//! # Ok::<(), rtuv_core::errors::TuvError>(())
//! ```

pub mod config;
pub mod errors;
pub mod invoker;
pub mod parameters;
pub mod rates;
pub mod report;

pub use config::TuvConfig;
pub use invoker::{tuv_cli, TuvOutcome, TuvRunner};
pub use parameters::{FloatValue, InvocationParameters};
pub use rates::{PhotolysisKey, PhotolysisRates};
pub use report::{decode_report, RawReport, ReportLayout, TuvReport};
