/*!

This is the long-form manual for `ranking_core` and `decode-rankings`.

## The manifest

The manifest (`config.json`) lists the objects and their images:

```json
{
  "objects": {
    "M45_2026": {
      "folder": "M45_2026",
      "images": ["bcw-525.jpg", "edh-188.jpg", "jkl-002.jpg"],
      "gridColumns": 4
    }
  }
}
```

Each image is named `<initials>-<number>.<ext>`. The initials identify the
contributor, the number is what students see and send back. Images named
`<initials>.<ext>` have no number: the board shows their position instead, and
the decoder cannot recognize them.

Only `images` is needed to decode rankings. `folder` and `gridColumns` are used by
the interactive board.

### Duplicate numbers

Two images of the same object with the same number cannot be told apart in a
ranking line. By default the manifest is rejected. Set
`RANKINGS_DUPLICATE_POLICY` to `last-wins` or `first-wins` to keep one of them.

## Ranking lines

One submission per line:

```text
M45_2026,525,002,188
```

The first field is the object, the others are the numbers in ranked order (best
first). Numbers are compared as text: `002` and `2` are different numbers.
There is no quoting, so object names and initials cannot contain commas.

A number that is not in the manifest is decoded as `UNKNOWN` and counted as
such in the statistics, with a warning.

## `decode-rankings`

```bash
decode-rankings "M45_2026,525,002,188"
decode-rankings submissions.txt
cat submissions.txt | decode-rankings
```

With a file or piped input, a bad line is reported on the error output and
skipped. With a single ranking line as argument, a bad line fails the run.
Bytes that are not valid UTF-8 are replaced with U+FFFD, so such a line
decodes with unknown numbers instead of stopping the batch.

The output has three parts:
- every submission, decoded
- one leaderboard per object, sorted by average rank (ties follow the order of
  the images in the manifest, unknown numbers last)
- the decoded submissions as CSV, for spreadsheets

Average ranks are not adjusted for submissions of different lengths.

### Environment

- `RANKINGS_CONFIG`: path to the manifest (default `./config.json`)
- `RANKINGS_DUPLICATE_POLICY`: `reject` (default), `last-wins`, `first-wins`
- `RUST_LOG`: log level (default `warn`)

*/
