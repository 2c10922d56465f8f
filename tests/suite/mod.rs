mod providers;
mod session;
