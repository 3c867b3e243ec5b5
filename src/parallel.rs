//! Order-preserving fan-out for independent units of work (ratio steps, chords,
//! dyads). With the `parallel` feature the units run on the rayon pool; without
//! it they run in sequence. Either way results come back in input order.

use crate::error::Result;

#[cfg(feature = "parallel")]
pub(crate) fn try_map_ordered<T, R, F>(items: &[T], f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    use rayon::prelude::*;
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn try_map_ordered<T, R, F>(items: &[T], f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync + Send,
{
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DissonanceError;

    #[test]
    fn keeps_input_order() {
        let items: Vec<u32> = (0..1000).collect();
        let doubled = try_map_ordered(&items, |&x| Ok(x * 2)).unwrap();
        assert_eq!(doubled, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn propagates_errors() {
        let items = [1, 2, 3];
        let result: Result<Vec<i32>> = try_map_ordered(&items, |&x| {
            if x == 2 {
                Err(DissonanceError::invalid("x", "two"))
            } else {
                Ok(x)
            }
        });
        assert!(result.is_err());
    }
}
