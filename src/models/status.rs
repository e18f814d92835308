use strum::{Display, EnumIter, EnumString};

/// Lifecycle stage of a project, persisted as its variant name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum ProjectStatus {
    #[default]
    NotStarted,
    Ongoing,
    Completed,
}

impl ProjectStatus {
    /// Menu choice used by the console (`1`, `2`, `3`)
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::NotStarted),
            "2" => Some(Self::Ongoing),
            "3" => Some(Self::Completed),
            _ => None,
        }
    }
}
