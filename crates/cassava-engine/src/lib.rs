//! cassava_engine - Spreadsheet expression parsing and evaluation.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn addr(name: &str) -> Address {
        name.parse().unwrap()
    }

    fn eval(text: &str) -> f64 {
        parse(text).unwrap().eval(None).unwrap()
    }

    /// The grid most tests start from.
    fn sample_grid() -> Grid {
        let mut grid = Grid::new();
        grid.put_a1("A1", "1")
            .unwrap()
            .put_a1("A2", "2.0")
            .unwrap()
            .put_a1("B1", "1+2")
            .unwrap()
            .put_a1("B2", "B1+1")
            .unwrap()
            .put_a1("C1", "B2*A1")
            .unwrap()
            .put_a1("C2", "B1 - A1 - A2")
            .unwrap()
            .put_a1("D1", "-9")
            .unwrap()
            .put_a1("D2", "A1-5")
            .unwrap();
        grid
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("10-2-1"), 7.0);
        assert_eq!(eval("10-2-20"), -12.0);
        assert_eq!(eval("40/4/2"), 5.0);
        assert_eq!(eval("64*3/2*8"), 768.0);
    }

    #[test]
    fn test_operator_precedence() {
        assert_eq!(eval("10-2-1+10-3"), 14.0);
        assert_eq!(eval("10-2-1+10*8-3"), 84.0);
        assert_eq!(eval("10-2-1+10*8-3/2*9/3"), 82.5);
        assert_eq!(eval("1+2*3"), 7.0);
    }

    #[test]
    fn test_whitespace_tolerance() {
        assert_eq!(eval("  0  "), 0.0);
        assert_eq!(eval(" 0.9 "), 0.9);
        assert_eq!(parse("  B232  ").unwrap().to_string(), "B232");
        assert_eq!(eval(" 1 + 2 * 3 "), 7.0);
    }

    #[test]
    fn test_terminal_classification() {
        assert_eq!(parse("1").unwrap().to_string(), "1.00");
        assert_eq!(parse("1.10000000003204343").unwrap().to_string(), "1.10");
        assert!(matches!(parse("B2").unwrap(), Expr::Reference(_)));
        assert_eq!(parse("").unwrap().to_string(), "");

        for text in ["junk", "b2", "BB2", "1. 9"] {
            assert!(
                matches!(parse(text), Err(EngineError::MalformedExpression { .. })),
                "{text:?} should be malformed"
            );
        }
        assert!(matches!(
            parse_terminal("1*3"),
            Err(EngineError::MalformedExpression { .. })
        ));
    }

    #[test]
    fn test_sample_grid_strict_reads() {
        let grid = sample_grid();
        assert_eq!(grid.get(&addr("C1")).unwrap(), 4.0);
        assert_eq!(grid.get(&addr("C2")).unwrap(), 0.0);
        assert_eq!(grid.get_strict(&addr("C1"), DEFAULT_PRECISION).unwrap(), "4.00");
        assert_eq!(grid.get_strict(&addr("C2"), DEFAULT_PRECISION).unwrap(), "0.00");
        assert_eq!(grid.get_strict(&addr("D1"), DEFAULT_PRECISION).unwrap(), "-9.00");
        assert_eq!(grid.get_strict(&addr("D2"), DEFAULT_PRECISION).unwrap(), "-4.00");
    }

    #[test]
    fn test_negatives_formatted() {
        let grid = sample_grid();
        assert_eq!(grid.get_formatted(&addr("D1"), 2).unwrap(), "-9.00");
        assert_eq!(grid.get_formatted(&addr("D2"), 2).unwrap(), "-4.00");
    }

    #[test]
    fn test_blank_cells() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "").unwrap().put_a1("E2", "E1").unwrap();

        assert_eq!(grid.get(&addr("E1")), Err(EngineError::EmptyCellEvaluated));
        assert_eq!(grid.get_formatted(&addr("E1"), 2).unwrap(), "");
        assert_eq!(
            grid.get_formatted(&addr("E2"), 2),
            Err(EngineError::EmptyCellEvaluated)
        );
        assert_eq!(
            grid.read(&addr("E1"), ReadPolicy::Strict, 2),
            Err(EngineError::EmptyCellEvaluated)
        );

        grid.put_a1("E1", "1*A1").unwrap();
        assert_eq!(grid.get(&addr("E2")).unwrap(), 1.0);
    }

    #[test]
    fn test_self_reference() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "E1").unwrap();
        assert_eq!(
            grid.get(&addr("E1")),
            Err(EngineError::SelfReference(addr("E1")))
        );
        assert_eq!(
            grid.get_formatted(&addr("E1"), 2),
            Err(EngineError::SelfReference(addr("E1")))
        );
    }

    #[test]
    fn test_self_reference_inside_expression_is_circular() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "E1+1").unwrap();
        assert!(matches!(
            grid.get(&addr("E1")),
            Err(EngineError::CircularReference { .. })
        ));
    }

    #[test]
    fn test_two_cell_cycle() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "E2").unwrap().put_a1("E2", "E1").unwrap();

        for name in ["E1", "E2"] {
            assert!(matches!(
                grid.get_formatted(&addr(name), 2),
                Err(EngineError::CircularReference { .. })
            ));
        }
    }

    #[test]
    fn test_four_cell_cycle() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "F2*3")
            .unwrap()
            .put_a1("E2", "F1")
            .unwrap()
            .put_a1("F1", "E1*3")
            .unwrap()
            .put_a1("F2", "F1")
            .unwrap();

        let err = grid.get_formatted(&addr("E1"), 2).unwrap_err();
        assert_eq!(
            err,
            EngineError::CircularReference {
                address: addr("F2"),
                chain: vec![addr("E1"), addr("F1"), addr("F2")],
            }
        );
        assert!(matches!(
            grid.get_formatted(&addr("E2"), 2),
            Err(EngineError::CircularReference { .. })
        ));
    }

    #[test]
    fn test_guard_does_not_leak_between_reads() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "E2").unwrap().put_a1("E2", "E1").unwrap();
        assert!(grid.get(&addr("E1")).is_err());

        // Chains through B1 in every read; must not look circular the second time.
        assert_eq!(grid.get(&addr("C1")).unwrap(), 4.0);
        assert_eq!(grid.get(&addr("C1")).unwrap(), 4.0);
        assert_eq!(grid.get(&addr("B2")).unwrap(), 4.0);
    }

    #[test]
    fn test_repeated_reference_within_one_read_is_rejected() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "A1+A1").unwrap();
        assert_eq!(
            grid.get(&addr("E1")),
            Err(EngineError::CircularReference {
                address: addr("A1"),
                chain: vec![addr("A1")],
            })
        );
    }

    #[test]
    fn test_reference_out_of_range() {
        let mut grid = sample_grid();
        grid.put_a1("A1", "Z9").unwrap();
        assert_eq!(
            grid.get(&addr("A1")),
            Err(EngineError::AddressOutOfRange { address: addr("Z9") })
        );

        let expr = parse("A1+1").unwrap();
        assert_eq!(
            expr.eval(None),
            Err(EngineError::AddressOutOfRange { address: addr("A1") })
        );
        assert_eq!(expr.eval(Some(&sample_grid())).unwrap(), 2.0);
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            Grid::from_rows([vec!["1", "2"], vec!["3"]]).unwrap_err(),
            EngineError::ColumnCountMismatch {
                row: 2,
                expected: 2,
                found: 1,
            }
        );

        let wide: Vec<String> = (0..27).map(|i| i.to_string()).collect();
        assert_eq!(
            Grid::from_rows([wide]).unwrap_err(),
            EngineError::TooManyColumns { found: 27 }
        );

        let widest: Vec<String> = (0..26).map(|i| i.to_string()).collect();
        let grid = Grid::from_rows([widest]).unwrap();
        assert_eq!(grid.column_count(), MAX_COLUMNS);
        assert_eq!(grid.get(&addr("Z1")).unwrap(), 25.0);
    }

    #[test]
    fn test_concurrent_reads_share_a_grid() {
        let mut grid = sample_grid();
        grid.put_a1("E1", "E2").unwrap().put_a1("E2", "E1").unwrap();
        let grid = &grid;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    scope.spawn(move || {
                        if i % 2 == 0 {
                            grid.get(&addr("C1")).map(|v| v.to_string())
                        } else {
                            grid.get(&addr("E1")).map(|v| v.to_string())
                        }
                    })
                })
                .collect();

            for (i, handle) in handles.into_iter().enumerate() {
                let result = handle.join().unwrap();
                if i % 2 == 0 {
                    assert_eq!(result.unwrap(), "4");
                } else {
                    assert!(result.is_err());
                }
            }
        });
    }
}
