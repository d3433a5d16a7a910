#![no_main]

use libfuzzer_sys::fuzz_target;
use mvel::registry::{Declaration, Registry, TypeDescriptor};
use mvel::syntax::ast::ParseMode;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Ok(registry) = Registry::build([
        Declaration::new("p", TypeDescriptor::new("org.mvel3.Person")),
        Declaration::new("total", TypeDescriptor::new("java.math.BigDecimal")),
    ]) else {
        return;
    };
    // Translation is total over anything that parses.
    for mode in [ParseMode::Expression, ParseMode::Program] {
        let _ = mvel::transpile(s, mode, &registry);
    }
});
