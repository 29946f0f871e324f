//! REST adapters for the hosted backend (PostgREST protocol).
//!
//! One shared [`RestClient`] per session; each adapter owns a clone.
//!
//! | adapter                     | table                 |
//! |-----------------------------|-----------------------|
//! | `RestProfileService`        | `profiles`            |
//! | `RestAccountRepository`     | `profiles`            |
//! | `RestConsumptionRepository` | `consumo_usuarios`    |
//! | `RestMetricsStore`          | `metricas_usabilidad` |
//! | `RestRoleChecker`           | `user_roles`          |

mod account;
mod client;
mod energy;
mod profile;
mod usability;

pub use account::RestAccountRepository;
pub use client::{RestClient, RestConfig, RestError};
pub use energy::RestConsumptionRepository;
pub use profile::RestProfileService;
pub use usability::{RestMetricsStore, RestRoleChecker};
