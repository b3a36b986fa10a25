#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod http_tests;

#[cfg(test)]
mod notification_tests;

#[cfg(test)]
mod announcement_tests;

#[cfg(test)]
mod calendar_tests;

#[cfg(test)]
mod archive_tests;
