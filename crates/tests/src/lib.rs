#[cfg(test)]
mod common;

#[cfg(test)]
mod navigation_tests;

#[cfg(test)]
mod attendance_rate_tests;

#[cfg(test)]
mod root_view_tests;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod auth_flow_tests;

#[cfg(test)]
mod dashboard_tests;

#[cfg(test)]
mod check_in_tests;

#[cfg(test)]
mod event_tests;
