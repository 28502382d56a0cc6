use super::*;

const ALPHAS: [u8; 6] = [0, 1, 100, 128, 254, 255];

fn with_alpha(a: u8) -> Bgra8 {
    Bgra8::new(10, 20, 30, a)
}

#[test]
fn factors_match_the_operator_table() {
    for da in ALPHAS {
        for sa in ALPHAS {
            let (d, s) = (with_alpha(da), with_alpha(sa));
            let (da, sa) = (i32::from(da), i32::from(sa));
            let expected = [
                (0, 0),
                (0, 255),
                (255, 0),
                (255 - sa, 255),
                (255, 255 - da),
                (0, da),
                (sa, 0),
                (0, 255 - da),
                (255 - sa, 0),
                (255 - sa, da),
                (sa, 255 - da),
                (255 - sa, 255 - da),
                (255, 255),
            ];
            for (op, want) in CompositeOp::ALL.into_iter().zip(expected) {
                assert_eq!(op.factors(d, s), want, "{op:?} da={da} sa={sa}");
            }
        }
    }
}

#[test]
fn factors_stay_in_channel_range() {
    for op in CompositeOp::ALL {
        for da in ALPHAS {
            for sa in ALPHAS {
                let (fd, fs) = op.factors(with_alpha(da), with_alpha(sa));
                assert!((0..=255).contains(&fd) && (0..=255).contains(&fs));
            }
        }
    }
}

#[test]
fn ids_cover_zero_to_twelve() {
    assert_eq!(CompositeOp::from_id(0), Some(CompositeOp::Clear));
    assert_eq!(CompositeOp::from_id(3), Some(CompositeOp::SourceOver));
    assert_eq!(CompositeOp::from_id(11), Some(CompositeOp::Xor));
    assert_eq!(CompositeOp::from_id(12), Some(CompositeOp::Lighter));
    assert_eq!(CompositeOp::from_id(13), None);
    assert_eq!(CompositeOp::from_id(-1), None);
    for op in CompositeOp::ALL {
        assert_eq!(CompositeOp::from_id(op.id()), Some(op));
    }
}

#[test]
fn default_is_source_over() {
    assert_eq!(CompositeOp::default(), CompositeOp::SourceOver);
}
