use atwt::{
    DetailMode, Error, Image, ImageView, PlaneBuf, PlaneRef, SampleKind, TransformParams,
    dilated_b3_kernel, extract_frequency, extract_frequency_plane, transform, transform_plane,
};

fn ramp_u8(w: usize, h: usize) -> Image<u8> {
    let data = (0..w * h).map(|i| ((i % w) * 10) as u8).collect();
    Image::from_vec(w, h, data).expect("valid image")
}

#[test]
fn linear_ramp_has_no_interior_detail() {
    let img = ramp_u8(20, 12);
    let out = transform(&img.as_view(), &TransformParams::new(1)).expect("valid input");

    assert_eq!((out.width(), out.height()), (20, 12));
    for y in 0..12 {
        for x in 2..18 {
            assert_eq!(out.get(x, y), Some(&128), "x={x} y={y}");
        }
    }
}

#[test]
fn float_band_on_ramp_only_responds_at_the_borders() {
    let img = ramp_u8(20, 12);
    let out = extract_frequency(&img.as_view(), 1).expect("valid input");

    for y in 0..12 {
        let row = out.row(y);
        // Reflection bends the ramp back on both sides; the left side goes
        // negative and clamps to zero.
        assert_eq!(row[0], 0);
        assert_eq!(row[1], 0);
        assert!(row[2..18].iter().all(|&v| v == 0));
        // 180 - 178.75 and 190 - 182.5, rounded half away from zero.
        assert_eq!(row[18], 1);
        assert_eq!(row[19], 8);
    }
}

#[test]
fn results_do_not_depend_on_input_stride() {
    let img = ramp_u8(20, 12);
    let stride = 27;
    let mut padded = vec![255u8; stride * 12];
    for y in 0..12 {
        padded[y * stride..y * stride + 20].copy_from_slice(img.row(y));
    }
    let view = ImageView::from_slice(20, 12, stride, &padded).expect("valid view");

    let params = TransformParams::new(2).with_mode(DetailMode::SquaredMagnitude);
    assert_eq!(
        transform(&view, &params).expect("valid input"),
        transform(&img.as_view(), &params).expect("valid input")
    );
    assert_eq!(
        extract_frequency(&view, 2).expect("valid input"),
        extract_frequency(&img.as_view(), 2).expect("valid input")
    );
}

#[test]
fn dynamic_planes_match_typed_calls() {
    let img = Image::from_vec(
        24,
        24,
        (0..24 * 24u32).map(|i| (i * 97 % 4096) as u16).collect(),
    )
    .expect("valid image");
    let plane = PlaneRef::from(img.as_view());
    let params = TransformParams::new(2);

    assert_eq!(
        transform_plane(&plane, &params).expect("valid input"),
        PlaneBuf::U16(transform(&img.as_view(), &params).expect("valid input"))
    );
    assert_eq!(
        extract_frequency_plane(&plane, 2).expect("valid input"),
        PlaneBuf::U16(extract_frequency(&img.as_view(), 2).expect("valid input"))
    );

    let ten_bit = PlaneRef::U16 {
        view: img.as_view(),
        bits: 10,
    };
    assert_eq!(
        transform_plane(&ten_bit, &params).unwrap_err(),
        Error::UnsupportedFormat {
            kind: SampleKind::Integer,
            bits: 10
        }
    );
}

#[test]
fn dilated_kernel_places_taps_on_holes() {
    let k = dilated_b3_kernel(2);
    assert_eq!(k.len(), 17);
    for (i, &w) in k.iter().enumerate() {
        if i % 4 != 0 {
            assert_eq!(w, 0.0, "i={i}");
        }
    }
    assert_eq!(k[0], 1.0 / 16.0);
    assert_eq!(k[4], 1.0 / 4.0);
    assert_eq!(k[8], 3.0 / 8.0);
    assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-15);
}

#[cfg(feature = "serde")]
#[test]
fn params_load_from_json_with_defaults() {
    let params: TransformParams =
        serde_json::from_str(r#"{"level": 2, "mode": "squared_magnitude"}"#).expect("valid json");
    assert_eq!(
        params,
        TransformParams::new(2).with_mode(DetailMode::SquaredMagnitude)
    );

    let params: TransformParams =
        serde_json::from_str(r#"{"kernel": [1, 2, 2, 2, 1]}"#).expect("valid json");
    assert_eq!(params.level, 1);
    assert_eq!(params.weights(), [1, 2, 2, 2, 1]);
}
