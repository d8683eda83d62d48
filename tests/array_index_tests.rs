//! Integration tests for index and insertion-point resolution.

use proptest::prelude::*;
use yamlpatch::patch::{ArrayIndex, ArrayInsertion, ArrayInsertionIndex, PatchError};
use yamlpatch::pointer::{Modifier, Pointer};

fn concrete(index: isize, modifiers: &[Modifier], length: usize) -> Result<usize, PatchError> {
    let path = Pointer::root();
    ArrayIndex {
        index,
        modifiers,
        length,
        path: &path,
    }
    .concrete()
}

fn insertion(
    index: isize,
    modifiers: &[Modifier],
    length: usize,
) -> Result<ArrayInsertionIndex, PatchError> {
    let path = Pointer::root();
    ArrayInsertion {
        index,
        modifiers,
        length,
        path: &path,
    }
    .concrete()
}

#[test]
fn test_one_past_negative_length_fails() {
    for length in 1..5usize {
        let index = -(length as isize) - 1;
        assert_eq!(
            concrete(index, &[], length),
            Err(PatchError::MissingIndex {
                index,
                length,
                path: Pointer::root()
            })
        );
    }
}

#[test]
fn test_missing_index_carries_pointer() {
    let path = Pointer::parse("/items/5").unwrap();
    let err = ArrayIndex {
        index: 5,
        modifiers: &[],
        length: 2,
        path: &path,
    }
    .concrete()
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Expected to find array index '5' but found array of length '2' for path '/items/5'"
    );
}

#[test]
fn test_insertion_boundaries() {
    assert_eq!(
        insertion(0, &[Modifier::Before], 3),
        Ok(ArrayInsertionIndex::new(0, true))
    );
    assert_eq!(
        insertion(2, &[Modifier::After], 3),
        Ok(ArrayInsertionIndex::new(3, true))
    );
    assert_eq!(
        insertion(-1, &[Modifier::After], 3),
        Ok(ArrayInsertionIndex::new(3, true))
    );
    assert_eq!(
        insertion(1, &[Modifier::After], 3),
        Ok(ArrayInsertionIndex::new(2, true))
    );
}

#[test]
fn test_after_on_last_element_of_single_item() {
    assert_eq!(
        insertion(0, &[Modifier::After], 1),
        Ok(ArrayInsertionIndex::new(1, true))
    );
    assert_eq!(
        insertion(-1, &[Modifier::After], 1),
        Ok(ArrayInsertionIndex::new(1, true))
    );
}

proptest! {
    #[test]
    fn test_positive_index_resolves_to_itself(length in 1usize..64, offset in 0usize..64) {
        let index = offset % length;
        prop_assert_eq!(concrete(index as isize, &[], length), Ok(index));
    }

    #[test]
    fn test_negative_index_counts_from_end(length in 1usize..64, offset in 1usize..64) {
        let back = 1 + (offset - 1) % length;
        prop_assert_eq!(concrete(-(back as isize), &[], length), Ok(length - back));
    }

    #[test]
    fn test_net_zero_chain_is_identity(length in 1usize..32, offset in 0usize..32, steps in 0usize..80) {
        let index = (offset % length) as isize;
        let mut modifiers = vec![Modifier::Next; steps];
        modifiers.extend(std::iter::repeat(Modifier::Previous).take(steps));

        prop_assert_eq!(concrete(index, &modifiers, length), concrete(index, &[], length));
    }

    #[test]
    fn test_plain_insertion_overwrites(length in 1usize..32, offset in 0usize..32) {
        let index = offset % length;
        prop_assert_eq!(
            insertion(index as isize, &[], length),
            Ok(ArrayInsertionIndex::new(index, false))
        );
    }
}
