//! Page controllers, one per staff workflow.

pub mod agents;
pub mod dashboard;
pub mod login;
pub mod properties;
pub mod users;

pub use agents::{AgentMode, ManageAgentsPage};
pub use dashboard::DashboardPage;
pub use login::{LoginMode, LoginPage};
pub use properties::{EditorMode, PropertyEditor, SaveOutcome};
pub use users::ManageUsersPage;
