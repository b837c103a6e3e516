#[cfg(test)]
mod tests {
    use crate::machine::isa::{Instruction, MAX_OPERANDS};

    macro_rules! arity_table {
        (
            $( $(#[$doc:meta])* $name:ident = $opcode:literal, $mnemonic:literal => [ $( $field:ident : $access:ident ),* $(,)? ] ),* $(,)?
        ) => {{
            vec![
                $( ($opcode as i64, $mnemonic, <[&str]>::len(&[ $( stringify!($access) ),* ])), )*
            ]
        }};
    }

    fn current_table() -> Vec<(i64, &'static str, usize)> {
        crate::for_each_instruction!(arity_table)
    }

    #[test]
    fn opcode_table_unchanged() {
        assert_eq!(
            current_table(),
            vec![
                (1, "ADD", 3),
                (2, "MUL", 3),
                (3, "IN", 1),
                (4, "OUT", 1),
                (5, "JT", 2),
                (6, "JF", 2),
                (7, "LT", 3),
                (8, "EQ", 3),
                (9, "ARB", 1),
                (99, "HALT", 0),
            ]
        );
    }

    #[test]
    fn generated_counts_match_table() {
        for (opcode, _, count) in current_table() {
            let instr = Instruction::try_from(opcode).unwrap();
            assert_eq!(instr.operand_count(), count);
            assert!(count <= MAX_OPERANDS);
        }
        assert_eq!(Instruction::ALL.len(), current_table().len());
    }
}
