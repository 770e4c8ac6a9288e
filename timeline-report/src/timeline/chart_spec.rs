// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::ChartDataError, timeline::concurrency::ConcurrencyPoint};
use serde_json::json;

/// Builds the declarative Vega-Lite spec for the concurrency line chart.
pub(crate) fn concurrency_chart(
    points: &[ConcurrencyPoint],
    width: u32,
) -> Result<String, ChartDataError> {
    let values: Vec<_> = points
        .iter()
        .map(|point| json!({ "time": point.time, "workers": point.workers }))
        .collect();

    let spec = json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "description": "Number of concurrently running tests over time",
        "width": width,
        "height": 120,
        "data": { "values": values },
        "mark": { "type": "line", "interpolate": "step-after" },
        "encoding": {
            "x": {
                "field": "time",
                "type": "temporal",
                "timeUnit": "hoursminutesseconds",
                "title": "time"
            },
            "y": {
                "field": "workers",
                "type": "quantitative",
                "title": "running tests"
            }
        }
    });

    Ok(serde_json::to_string_pretty(&spec)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_embeds_points_and_width() {
        let points = vec![
            ConcurrencyPoint {
                second: 0,
                time: "00:00:00".to_owned(),
                workers: 2,
            },
            ConcurrencyPoint {
                second: 3,
                time: "00:00:03".to_owned(),
                workers: 0,
            },
        ];

        let spec = concurrency_chart(&points, 800).expect("spec serializes");
        let parsed: serde_json::Value = serde_json::from_str(&spec).expect("spec is valid JSON");

        assert_eq!(parsed["width"], 800);
        let values = parsed["data"]["values"]
            .as_array()
            .expect("values is an array");
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["time"], "00:00:00");
        assert_eq!(values[0]["workers"], 2);
        assert_eq!(values[1]["workers"], 0);
    }

    #[test]
    fn empty_series_is_well_formed() {
        let spec = concurrency_chart(&[], 600).expect("spec serializes");
        let parsed: serde_json::Value = serde_json::from_str(&spec).expect("spec is valid JSON");
        assert_eq!(parsed["data"]["values"], json!([]));
    }
}
