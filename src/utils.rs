/// Run an expression under a heading and log how long it took.
#[macro_export]
macro_rules! unit {
  ($name:expr, $($tail:tt)*) => {
    {
      log::info!("={}==================================================",$name);
      let now = std::time::Instant::now();
      let value = $($tail)*;
      log::debug!("Done  `{}` ({} ms)", $name, now.elapsed().as_millis());
      log::info!("");
      value
    }
  };
}
