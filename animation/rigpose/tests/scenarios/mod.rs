mod playback;
