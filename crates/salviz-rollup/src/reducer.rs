//! Group reducers

use salviz_model::Record;

/// Collapses one non-empty group to a single value
///
/// The engine never calls a reducer with an empty group.
pub trait Reducer<T> {
    /// Reduced value type
    type Output;

    /// Reduce a group of items sharing a key
    fn reduce(&self, group: &[&T]) -> Self::Output;
}

/// Group size
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl<T> Reducer<T> for Count {
    type Output = usize;

    #[inline]
    fn reduce(&self, group: &[&T]) -> usize {
        group.len()
    }
}

/// Arithmetic mean of a numeric field
#[derive(Debug, Clone, Copy)]
pub struct Mean<F>(pub F);

impl<T, F> Reducer<T> for Mean<F>
where
    F: Fn(&T) -> f64,
{
    type Output = f64;

    #[allow(clippy::cast_precision_loss)]
    fn reduce(&self, group: &[&T]) -> f64 {
        let sum: f64 = group.iter().map(|item| (self.0)(*item)).sum();
        sum / group.len() as f64
    }
}

/// Mean of [`Record::salary_usd`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSalary;

impl Reducer<Record> for MeanSalary {
    type Output = f64;

    fn reduce(&self, group: &[&Record]) -> f64 {
        Mean(Record::salary_usd).reduce(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salviz_test_utils::record;

    #[test]
    fn count_is_group_size() {
        let items = [1, 2, 3];
        let group: Vec<&i32> = items.iter().collect();
        assert_eq!(Count.reduce(&group), 3);
    }

    #[test]
    fn mean_of_field() {
        let items = [(1, 2.0), (2, 4.0)];
        let group: Vec<_> = items.iter().collect();
        let mean = Mean(|item: &(i32, f64)| item.1).reduce(&group);
        assert_eq!(mean, 3.0);
    }

    #[test]
    fn mean_salary_is_exact_for_known_group() {
        let records = [
            record("SE", "M", "Data Scientist", 100.0),
            record("SE", "M", "Data Scientist", 200.0),
            record("SE", "M", "Data Scientist", 300.0),
        ];
        let group: Vec<_> = records.iter().collect();
        assert_eq!(MeanSalary.reduce(&group), 200.0);
    }
}
