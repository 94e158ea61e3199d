/// Rounds a requested size up to its power-of-two size class.
///
/// The search starts at 1 and doubles, so a request of 0 still lands in
/// the smallest class. Rounding keeps allocated block sizes in a small set
/// of size classes, which bounds fragmentation and keeps merge outcomes
/// deterministic.
///
/// # Examples
///
/// ```rust
/// use rmemsim::round_up;
///
/// assert_eq!(round_up!(10), 16); // next class up.
/// assert_eq!(round_up!(16), 16); // already a class boundary.
/// assert_eq!(round_up!(0), 1);   // smallest class.
/// ```
#[macro_export]
macro_rules! round_up {
  ($value:expr) => {{
    let requested: usize = $value;
    let mut class: usize = 1;
    while class < requested {
      class <<= 1;
    }
    class
  }};
}

#[cfg(test)]
mod tests {
  #[test]
  fn test_round_up() {
    assert_eq!(round_up!(0), 1);
    assert_eq!(round_up!(1), 1);

    let mut classes = Vec::new();

    for exp in 1..=16 {
      let class = 1usize << exp;

      let sizes = ((class >> 1) + 1)..=class;

      classes.push((sizes, class));
    }

    for (sizes, expected) in classes {
      for size in sizes.step_by(7) {
        assert_eq!(expected, round_up!(size));
      }
    }
  }
}
