//! 选课调和
//!
//! 把「期望选课集合」与「已存储选课集合」做差集，得到需要落库的
//! 最小插入/删除集。教师代学生编辑时 `allowed` 为该教师的任教课程，
//! 本人编辑资料时 `allowed` 为全部课程。

use std::collections::HashSet;

/// 调和结果：需要新增与需要删除的课程 ID（均已排序，保证落库与测试稳定）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnrollmentDelta {
    pub to_add: Vec<i64>,
    pub to_remove: Vec<i64>,
}

impl EnrollmentDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// 计算选课差集
///
/// - `to_add = desired ∩ allowed − existing`
/// - `to_remove = existing ∩ allowed − desired`
///
/// `allowed` 之外的课程既不会新增也不会删除：提交里夹带范围外的
/// 课程会被静默忽略，已有的范围外选课保持原状。
pub fn reconcile_course_selection(
    desired: &HashSet<i64>,
    existing: &HashSet<i64>,
    allowed: &HashSet<i64>,
) -> EnrollmentDelta {
    let mut to_add: Vec<i64> = desired
        .intersection(allowed)
        .filter(|id| !existing.contains(id))
        .copied()
        .collect();
    let mut to_remove: Vec<i64> = existing
        .intersection(allowed)
        .filter(|id| !desired.contains(id))
        .copied()
        .collect();

    to_add.sort_unstable();
    to_remove.sort_unstable();

    EnrollmentDelta { to_add, to_remove }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    // 模拟存储层应用差集后的选课集合
    fn apply(existing: &HashSet<i64>, delta: &EnrollmentDelta) -> HashSet<i64> {
        let mut result = existing.clone();
        for id in &delta.to_add {
            result.insert(*id);
        }
        for id in &delta.to_remove {
            result.remove(id);
        }
        result
    }

    #[test]
    fn test_add_and_remove() {
        let delta = reconcile_course_selection(&set(&[1, 3]), &set(&[2, 3]), &set(&[1, 2, 3, 4]));
        assert_eq!(delta.to_add, vec![1]);
        assert_eq!(delta.to_remove, vec![2]);
    }

    #[test]
    fn test_no_changes_when_sets_match() {
        let delta = reconcile_course_selection(&set(&[1, 2]), &set(&[1, 2]), &set(&[1, 2, 3]));
        assert!(delta.is_empty());
    }

    #[test]
    fn test_out_of_scope_desired_is_ignored() {
        // 教师只管课程 1、2，提交里夹带课程 9 不会被加入
        let delta = reconcile_course_selection(&set(&[1, 9]), &set(&[]), &set(&[1, 2]));
        assert_eq!(delta.to_add, vec![1]);
        assert!(delta.to_remove.is_empty());
    }

    #[test]
    fn test_out_of_scope_existing_is_retained() {
        // 学生已选的范围外课程 9 不会因为教师的提交被删除
        let delta = reconcile_course_selection(&set(&[1]), &set(&[1, 9]), &set(&[1, 2]));
        assert!(delta.is_empty());

        let delta = reconcile_course_selection(&set(&[2]), &set(&[1, 9]), &set(&[1, 2]));
        assert_eq!(delta.to_add, vec![2]);
        assert_eq!(delta.to_remove, vec![1]);
        assert!(apply(&set(&[1, 9]), &delta).contains(&9));
    }

    #[test]
    fn test_empty_desired_clears_only_allowed() {
        let delta = reconcile_course_selection(&set(&[]), &set(&[1, 2, 9]), &set(&[1, 2]));
        assert!(delta.to_add.is_empty());
        assert_eq!(delta.to_remove, vec![1, 2]);
        assert_eq!(apply(&set(&[1, 2, 9]), &delta), set(&[9]));
    }

    #[test]
    fn test_converges_to_formula() {
        // 收敛结果 = (existing − to_remove) ∪ to_add，范围外不受影响
        let desired = set(&[2, 3, 7]);
        let existing = set(&[1, 3, 9]);
        let allowed = set(&[1, 2, 3, 4]);

        let delta = reconcile_course_selection(&desired, &existing, &allowed);
        let converged = apply(&existing, &delta);
        assert_eq!(converged, set(&[2, 3, 9]));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let desired = set(&[2, 3]);
        let existing = set(&[1, 3, 9]);
        let allowed = set(&[1, 2, 3]);

        let first = reconcile_course_selection(&desired, &existing, &allowed);
        let converged = apply(&existing, &first);
        // 同一期望集再跑一遍不应产生任何变更
        let second = reconcile_course_selection(&desired, &converged, &allowed);
        assert!(second.is_empty());
    }

    #[test]
    fn test_universe_scope_behaves_like_plain_diff() {
        let universe = set(&[1, 2, 3, 4, 5]);
        let delta = reconcile_course_selection(&set(&[1, 4]), &set(&[2, 4]), &universe);
        assert_eq!(delta.to_add, vec![1]);
        assert_eq!(delta.to_remove, vec![2]);
    }

    #[test]
    fn test_output_is_sorted() {
        let delta = reconcile_course_selection(&set(&[5, 3, 1]), &set(&[4, 2]), &set(&[1, 2, 3, 4, 5]));
        assert_eq!(delta.to_add, vec![1, 3, 5]);
        assert_eq!(delta.to_remove, vec![2, 4]);
    }
}
