use quickcheck::quickcheck;

use super::*;

#[test]
fn test_count_simple() {
    let input: Vec<char> = "abracadabra".chars().collect();
    let table = FrequencyTable::count(&input).unwrap();

    assert_eq!(table.len(), 5);
    assert_eq!(table.total(), 11);
    assert_eq!(table.get(&'a').unwrap().count, 5);
    assert_eq!(table.get(&'b').unwrap().count, 2);
    assert_eq!(table.get(&'r').unwrap().count, 2);
    assert_eq!(table.get(&'c').unwrap().count, 1);
    assert_eq!(table.get(&'d').unwrap().count, 1);
    assert!(table.get(&'z').is_none());
}

#[test]
fn test_count_keeps_first_occurrence_order() {
    let input: Vec<char> = "cabbac".chars().collect();
    let table = FrequencyTable::count(&input).unwrap();

    assert_eq!(table.symbols().copied().collect::<Vec<_>>(), vec!['c', 'a', 'b']);
}

#[test]
fn test_count_empty_input() {
    let input: Vec<u8> = vec![];

    assert!(matches!(FrequencyTable::count(&input), Err(HuffmanError::InvalidInput(_))));
}

#[test]
fn test_codes_start_unset() {
    let table = FrequencyTable::count(b"hello").unwrap();

    assert!(table.iter().all(|(_, e)| e.code.is_none()));
}

#[test]
fn test_set_code() {
    let mut table = FrequencyTable::count(b"ab").unwrap();
    let code: BitString = "1".parse().unwrap();

    assert!(table.set_code(&b'a', code.clone()));
    assert!(!table.set_code(&b'z', code.clone()));
    assert_eq!(table.code(&b'a'), Some(&code));
    assert_eq!(table.code(&b'b'), None);
}

quickcheck! {
    fn counts_sum_to_input_length(input: Vec<u8>) -> bool {
        if input.is_empty() {
            return FrequencyTable::count(&input).is_err();
        }
        let table = FrequencyTable::count(&input).unwrap();
        table.iter().map(|(_, e)| e.count).sum::<usize>() == input.len()
            && table.total() == input.len()
            && table.iter().all(|(_, e)| e.count >= 1)
    }
}
