mod scenario;
mod trials;
