fn main() {
    if let Err(err) = colbrowser::mount(colbrowser::HOST_ELEMENT_ID) {
        web_sys::console::error_1(&err);
    }
}
