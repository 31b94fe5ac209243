use agentwatch_types::{DayForecast, HourlySample, ScoredHour};

/// Score one hour of conditions.
///
/// Wind speed dominates: the 20–35 km/h band is ideal, the 15–40 band still
/// rides, light wind under 10 is a write-off. Flat water helps, long wave
/// periods help a little.
pub fn score_hour(sample: &HourlySample) -> i32 {
    let mut score = 0;

    let wind = sample.wind_speed;
    if (20.0..=35.0).contains(&wind) {
        score += 50;
    } else if (15.0..=40.0).contains(&wind) {
        score += 40;
    } else if (10.0..15.0).contains(&wind) {
        score += 20;
    } else if wind < 10.0 {
        score -= 30;
    } else {
        score -= 20;
    }

    let wave = sample.wave_height;
    if wave <= 0.3 {
        score += 25;
    } else if wave <= 0.6 {
        score += 15;
    } else if wave > 1.0 {
        score -= 30;
    }

    let period = sample.wave_period;
    if period >= 10.0 {
        score += 10;
    } else if period >= 7.0 {
        score += 5;
    }

    score
}

/// Score every hour, keeping input order.
pub fn score_hours(samples: &[HourlySample]) -> Vec<ScoredHour> {
    samples
        .iter()
        .map(|s| ScoredHour {
            sample: s.clone(),
            score: score_hour(s),
        })
        .collect()
}

/// The highest-scoring hour; the first one on ties.
pub fn best_hour(samples: &[HourlySample]) -> Option<ScoredHour> {
    let mut best: Option<ScoredHour> = None;
    for scored in score_hours(samples) {
        match &best {
            Some(b) if scored.score <= b.score => {}
            _ => best = Some(scored),
        }
    }
    best
}

fn local_hour(time: &str) -> Option<u32> {
    let hh = time.split('T').nth(1)?.get(0..2)?;
    hh.parse().ok()
}

/// A rideable daylight hour: wind in [10, 40] km/h, local hour in [6, 19].
pub fn is_good_hour(sample: &HourlySample) -> bool {
    (10.0..=40.0).contains(&sample.wind_speed)
        && local_hour(&sample.time).is_some_and(|h| (6..=19).contains(&h))
}

/// Reduce one day's samples to its aggregate.
///
/// The day score is ten points per good hour, plus a twenty-point bonus when
/// the day's mean wind sits in the 15–35 km/h band.
pub fn analyze_day(date: &str, samples: &[HourlySample]) -> DayForecast {
    let good_hours = samples.iter().filter(|s| is_good_hour(s)).count() as u32;

    let (mut min_wind, mut max_wind, mut sum) = (f64::MAX, f64::MIN, 0.0);
    for s in samples {
        min_wind = min_wind.min(s.wind_speed);
        max_wind = max_wind.max(s.wind_speed);
        sum += s.wind_speed;
    }
    let (min_wind, max_wind, mean_wind) = if samples.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (min_wind, max_wind, sum / samples.len() as f64)
    };

    let mut score = good_hours as i32 * 10;
    if (15.0..=35.0).contains(&mean_wind) {
        score += 20;
    }

    DayForecast {
        date: date.to_string(),
        good_hours,
        min_wind,
        max_wind,
        mean_wind,
        score,
    }
}

/// Group samples by calendar day (encounter order) and rank days by score,
/// descending. The sort is stable: tied days keep their input order.
pub fn analyze_days(samples: &[HourlySample]) -> Vec<DayForecast> {
    let mut days: Vec<(String, Vec<HourlySample>)> = Vec::new();
    for sample in samples {
        let date = sample.time.get(0..10).unwrap_or("").to_string();
        match days.last_mut() {
            Some((d, bucket)) if *d == date => bucket.push(sample.clone()),
            _ => match days.iter_mut().find(|(d, _)| *d == date) {
                Some((_, bucket)) => bucket.push(sample.clone()),
                None => days.push((date, vec![sample.clone()])),
            },
        }
    }

    let mut out: Vec<DayForecast> = days
        .iter()
        .map(|(date, bucket)| analyze_day(date, bucket))
        .collect();
    out.sort_by(|a, b| b.score.cmp(&a.score));
    out
}
