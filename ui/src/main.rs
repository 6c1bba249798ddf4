// Trunk builds this binary for the browser with `--features csr`.
fn main() {
    #[cfg(feature = "csr")]
    user_manager_ui::mount();
}
