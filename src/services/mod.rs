pub mod upstream;
pub mod github_service;
pub mod presence_service;
pub mod weather_service;
pub mod contact_service;
pub mod skills_service;
