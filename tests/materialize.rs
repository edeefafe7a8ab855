use ironquery::testing::*;
use ironquery::{from_vec, range, Number, QueryError};
use std::collections::HashSet;

#[test]
fn to_list_and_to_array_keep_order() -> anyhow::Result<()> {
    let q = range(1, 5)?.map(|x: &i64| x * x);
    assert_eq!(q.to_list()?, vec![1, 4, 9, 16, 25]);
    assert_eq!(&*q.to_array()?, &[1, 4, 9, 16, 25]);
    Ok(())
}

#[test]
fn to_set_drops_duplicates() -> anyhow::Result<()> {
    let set = from_vec(vec!["b", "a", "b", "c", "a"]).to_set()?;
    assert_eq!(set, HashSet::from(["a", "b", "c"]));
    Ok(())
}

#[test]
fn to_map_later_entries_overwrite() -> anyhow::Result<()> {
    let staff = from_vec(sample_employees());
    let last_name_by_age = staff.to_map(|e: &Employee| e.age, |e: &Employee| e.name.clone())?;
    assert_eq!(last_name_by_age.len(), 5);
    assert_eq!(last_name_by_age[&28], "Frank");
    assert_eq!(last_name_by_age[&34], "Heidi");
    assert_eq!(last_name_by_age[&45], "Erin");

    let by_dept = staff.to_map_by_key(|e: &Employee| e.dept.clone())?;
    assert_eq!(by_dept.len(), 3);
    assert_eq!(by_dept["Engineering"].name, "Frank");
    assert_eq!(by_dept["Support"].name, "Grace");
    Ok(())
}

#[test]
fn materializing_surfaces_errors() {
    let bad = from_vec(vec![1i64, -5]).cast::<u32>();
    assert!(matches!(bad.to_list(), Err(QueryError::InvalidCast { from: "i64", to: "u32" })));
    assert!(matches!(bad.to_set(), Err(QueryError::InvalidCast { .. })));
    assert!(matches!(bad.to_array(), Err(QueryError::InvalidCast { .. })));
    assert!(bad.to_map_by_key(|v: &u32| *v).is_err());
}

#[test]
fn primitive_arrays_from_floats() -> anyhow::Result<()> {
    let arrays = from_vec(vec![1.75f64, -2.5, 300.0, 0.0]).to_primitive_array()?;
    assert_eq!(arrays.len(), 4);
    assert_eq!(arrays.i32_array(), vec![1, -2, 300, 0]);
    assert_eq!(arrays.i16_array(), vec![1, -2, 300, 0]);
    assert_eq!(arrays.i8_array(), vec![1, -2, 127, 0]);
    assert_eq!(arrays.i64_array(), vec![1, -2, 300, 0]);
    assert_eq!(arrays.bool_array(), vec![true, true, true, false]);
    assert_eq!(arrays.f32_array(), vec![1.75f32, -2.5, 300.0, 0.0]);
    Ok(())
}

#[test]
fn primitive_arrays_from_chars_and_bools() -> anyhow::Result<()> {
    let letters = from_vec(vec!['A', 'z']).to_primitive_array()?;
    assert_eq!(letters.i32_array(), vec![65, 122]);
    assert_eq!(letters.char_array(), vec!['A', 'z']);

    let flags = from_vec(vec![true, false, true]).to_primitive_array()?;
    assert_eq!(flags.i8_array(), vec![1, 0, 1]);
    assert_eq!(flags.f64_array(), vec![1.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn primitive_arrays_from_numbers() -> anyhow::Result<()> {
    let sums = from_vec(vec![vec![1, 2], vec![3]])
        .map(|v: &Vec<i32>| from_vec(v.clone()).sum().unwrap_or_default());
    let arrays = sums.to_primitive_array()?;
    assert_eq!(arrays.i64_array(), vec![3, 3]);

    let mixed = from_vec(vec![Number::Int(66), Number::Float(67.8)]).to_primitive_array()?;
    assert_eq!(mixed.char_array(), vec!['B', 'C']);
    Ok(())
}

#[test]
fn primitive_arrays_of_empty_query() -> anyhow::Result<()> {
    let arrays = ironquery::empty::<u16>().to_primitive_array()?;
    assert!(arrays.is_empty());
    assert!(arrays.f64_array().is_empty());
    Ok(())
}
