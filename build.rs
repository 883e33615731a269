fn main() {
    // Emits the ESP-IDF link arguments when building for the target.
    // Host-side test builds (no `espidf` feature) need nothing from us.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
