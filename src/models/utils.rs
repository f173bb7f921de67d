use anyhow::bail;
use ndarray::Array1;

/// The two distinct labels of a binary training set, ascending.
///
/// Binary models map the lower label to their negative class and the higher
/// label to their positive class.
pub fn binary_classes(y: &Array1<i32>) -> anyhow::Result<(i32, i32)> {
    let mut classes: Vec<i32> = y.iter().copied().collect();
    classes.sort_unstable();
    classes.dedup();
    match classes.as_slice() {
        [negative, positive] => Ok((*negative, *positive)),
        _ => bail!(
            "binary classifier needs exactly two classes in the training labels, found {:?}",
            classes
        ),
    }
}
